//! In-memory repository doubles and fixtures shared by the service tests.
//!
//! The doubles keep the same contract as the MongoDB-backed repositories:
//! id-ascending ordering, filtered totals, `NotFound` on missing single-row
//! updates/deletes, and silent bulk deletes.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::atomic::{AtomicI64, Ordering},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizdeck_server::{
    authz::Actor,
    errors::{AppError, AppResult},
    models::domain::{Answer, Category, Question, Quiz, Role, TakenQuiz, User},
    repositories::{
        AnswerRepository, CategoryFilter, CategoryRepository, QuestionRepository, QuizFilter,
        QuizRepository, TakenQuizRepository, UserRepository,
    },
    services::{
        AnswerService, CategoryService, QuestionService, QuizCascade, QuizService,
        TakenQuizService, UserService,
    },
};

fn page_window<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    let start = offset.max(0) as usize;
    if start >= items.len() {
        return vec![];
    }
    let end = (start + limit.max(0) as usize).min(items.len());
    items[start..end].to_vec()
}

fn not_found(entity: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", entity, id))
}

pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        let users = self.users.read().await;
        let mut items: Vec<_> = users.values().cloned().collect();
        items.sort_by_key(|u| u.id);
        let total = items.len() as i64;
        Ok((page_window(&items, offset, limit), total))
    }

    async fn update_profile(
        &self,
        id: i64,
        display_name: &str,
        about: Option<String>,
    ) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(|| not_found("User", id))?;
        user.display_name = display_name.to_string();
        user.about = about;
        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(|| not_found("User", id))?;
        user.password = password_hash.to_string();
        Ok(())
    }

    async fn set_role(&self, id: i64, role: Role) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or_else(|| not_found("User", id))?;
        user.role = role;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("User", id))
    }
}

pub struct InMemoryCategoryRepository {
    categories: RwLock<HashMap<i64, Category>>,
    next_id: AtomicI64,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

fn category_matches(category: &Category, filter: &CategoryFilter) -> bool {
    if filter.approved_only && !category.approved {
        return false;
    }
    if let Some(query) = &filter.search {
        return category.name.contains(query.as_str())
            || category.description.contains(query.as_str());
    }
    true
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, mut category: Category) -> AppResult<Category> {
        category.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.categories
            .write()
            .await
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        Ok(self
            .categories
            .read()
            .await
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list(
        &self,
        filter: &CategoryFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Category>, i64)> {
        let categories = self.categories.read().await;
        let mut items: Vec<_> = categories
            .values()
            .filter(|c| category_matches(c, filter))
            .cloned()
            .collect();
        items.sort_by_key(|c| c.id);
        let total = items.len() as i64;
        Ok((page_window(&items, offset, limit), total))
    }

    async fn update(&self, id: i64, name: &str, description: &str) -> AppResult<()> {
        let mut categories = self.categories.write().await;
        let category = categories
            .get_mut(&id)
            .ok_or_else(|| not_found("Category", id))?;
        category.name = name.to_string();
        category.description = description.to_string();
        Ok(())
    }

    async fn set_approved(&self, id: i64, approved: bool) -> AppResult<()> {
        let mut categories = self.categories.write().await;
        let category = categories
            .get_mut(&id)
            .ok_or_else(|| not_found("Category", id))?;
        category.approved = approved;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.categories
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("Category", id))
    }
}

pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<i64, Quiz>>,
    next_id: AtomicI64,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

fn quiz_matches(quiz: &Quiz, filter: &QuizFilter) -> bool {
    if let Some(approved) = filter.approved {
        if quiz.approved != approved {
            return false;
        }
    }
    if let Some(category_id) = filter.category_id {
        if quiz.category_id != category_id {
            return false;
        }
    }
    if let Some(owner_id) = filter.owner_id {
        if quiz.user_id != owner_id {
            return false;
        }
    }
    if let Some(query) = &filter.title_query {
        if !quiz.title.contains(query.as_str()) {
            return false;
        }
    }
    true
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, mut quiz: Quiz) -> AppResult<Quiz> {
        quiz.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.quizzes.write().await.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = ids
            .iter()
            .filter_map(|id| quizzes.get(id).cloned())
            .collect();
        items.sort_by_key(|q| q.id);
        Ok(items)
    }

    async fn list(
        &self,
        filter: &QuizFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|q| quiz_matches(q, filter))
            .cloned()
            .collect();
        items.sort_by_key(|q| q.id);
        let total = items.len() as i64;
        Ok((page_window(&items, offset, limit), total))
    }

    async fn find_ids(&self, filter: &QuizFilter) -> AppResult<Vec<i64>> {
        let quizzes = self.quizzes.read().await;
        let mut ids: Vec<_> = quizzes
            .values()
            .filter(|q| quiz_matches(q, filter))
            .map(|q| q.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn apply_update(
        &self,
        id: i64,
        title: &str,
        description: &str,
        category_id: i64,
    ) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes.get_mut(&id).ok_or_else(|| not_found("Quiz", id))?;
        quiz.title = title.to_string();
        quiz.description = description.to_string();
        quiz.category_id = category_id;
        quiz.approved = false;
        Ok(())
    }

    async fn set_approved(&self, id: i64, approved: bool) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes.get_mut(&id).ok_or_else(|| not_found("Quiz", id))?;
        quiz.approved = approved;
        Ok(())
    }

    async fn add_rating(&self, id: i64, rate: i64) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes.get_mut(&id).ok_or_else(|| not_found("Quiz", id))?;
        quiz.total_rate += rate as f64;
        quiz.rate_count += 1;
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<()> {
        let mut quizzes = self.quizzes.write().await;
        for id in ids {
            quizzes.remove(id);
        }
        Ok(())
    }
}

pub struct InMemoryQuestionRepository {
    questions: RwLock<HashMap<i64, Question>>,
    next_id: AtomicI64,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, mut question: Question) -> AppResult<Question> {
        question.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.questions
            .write()
            .await
            .insert(question.id, question.clone());
        Ok(question)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        Ok(self.questions.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        let mut items: Vec<_> = ids
            .iter()
            .filter_map(|id| questions.get(id).cloned())
            .collect();
        items.sort_by_key(|q| q.id);
        Ok(items)
    }

    async fn find_by_quiz(&self, quiz_id: i64) -> AppResult<Vec<Question>> {
        self.find_by_quiz_ids(&[quiz_id]).await
    }

    async fn find_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        let mut items: Vec<_> = questions
            .values()
            .filter(|q| quiz_ids.contains(&q.quiz_id))
            .cloned()
            .collect();
        items.sort_by_key(|q| q.id);
        Ok(items)
    }

    async fn update_text(&self, id: i64, text: &str) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        let question = questions
            .get_mut(&id)
            .ok_or_else(|| not_found("Question", id))?;
        question.text = text.to_string();
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.questions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("Question", id))
    }

    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        for id in ids {
            questions.remove(id);
        }
        Ok(())
    }

    async fn delete_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<()> {
        self.questions
            .write()
            .await
            .retain(|_, q| !quiz_ids.contains(&q.quiz_id));
        Ok(())
    }
}

pub struct InMemoryAnswerRepository {
    answers: RwLock<HashMap<i64, Answer>>,
    next_id: AtomicI64,
}

impl InMemoryAnswerRepository {
    pub fn new() -> Self {
        Self {
            answers: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl AnswerRepository for InMemoryAnswerRepository {
    async fn create(&self, mut answer: Answer) -> AppResult<Answer> {
        answer.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.answers.write().await.insert(answer.id, answer.clone());
        Ok(answer)
    }

    async fn create_many(&self, answers: Vec<Answer>) -> AppResult<Vec<Answer>> {
        let mut created = Vec::with_capacity(answers.len());
        for answer in answers {
            created.push(self.create(answer).await?);
        }
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Answer>> {
        Ok(self.answers.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Answer>> {
        let answers = self.answers.read().await;
        let mut items: Vec<_> = ids
            .iter()
            .filter_map(|id| answers.get(id).cloned())
            .collect();
        items.sort_by_key(|a| a.id);
        Ok(items)
    }

    async fn find_by_question_ids(&self, question_ids: &[i64]) -> AppResult<Vec<Answer>> {
        let answers = self.answers.read().await;
        let mut items: Vec<_> = answers
            .values()
            .filter(|a| question_ids.contains(&a.question_id))
            .cloned()
            .collect();
        items.sort_by_key(|a| a.id);
        Ok(items)
    }

    async fn update(&self, id: i64, text: &str, is_correct: bool) -> AppResult<()> {
        let mut answers = self.answers.write().await;
        let answer = answers.get_mut(&id).ok_or_else(|| not_found("Answer", id))?;
        answer.text = text.to_string();
        answer.is_correct = is_correct;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.answers
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("Answer", id))
    }

    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<()> {
        let mut answers = self.answers.write().await;
        for id in ids {
            answers.remove(id);
        }
        Ok(())
    }

    async fn delete_by_question_ids(&self, question_ids: &[i64]) -> AppResult<()> {
        self.answers
            .write()
            .await
            .retain(|_, a| !question_ids.contains(&a.question_id));
        Ok(())
    }
}

pub struct InMemoryTakenQuizRepository {
    taken: RwLock<HashMap<i64, TakenQuiz>>,
    next_id: AtomicI64,
}

impl InMemoryTakenQuizRepository {
    pub fn new() -> Self {
        Self {
            taken: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl TakenQuizRepository for InMemoryTakenQuizRepository {
    async fn create(&self, mut taken_quiz: TakenQuiz) -> AppResult<TakenQuiz> {
        taken_quiz.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.taken
            .write()
            .await
            .insert(taken_quiz.id, taken_quiz.clone());
        Ok(taken_quiz)
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TakenQuiz>, i64)> {
        let taken = self.taken.read().await;
        let mut items: Vec<_> = taken
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by_key(|t| t.id);
        let total = items.len() as i64;
        Ok((page_window(&items, offset, limit), total))
    }

    async fn delete_by_user(&self, user_id: i64) -> AppResult<()> {
        self.taken.write().await.retain(|_, t| t.user_id != user_id);
        Ok(())
    }

    async fn delete_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<()> {
        self.taken
            .write()
            .await
            .retain(|_, t| !quiz_ids.contains(&t.quiz_id));
        Ok(())
    }
}

/// Fully wired service graph backed by the in-memory doubles.
pub struct TestEnv {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub answers: Arc<dyn AnswerRepository>,
    pub taken_quizzes: Arc<dyn TakenQuizRepository>,
    pub user_service: UserService,
    pub category_service: CategoryService,
    pub quiz_service: QuizService,
    pub question_service: QuestionService,
    pub answer_service: AnswerService,
    pub taken_quiz_service: TakenQuizService,
}

impl TestEnv {
    pub fn new() -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let categories: Arc<dyn CategoryRepository> = Arc::new(InMemoryCategoryRepository::new());
        let quizzes: Arc<dyn QuizRepository> = Arc::new(InMemoryQuizRepository::new());
        let questions: Arc<dyn QuestionRepository> = Arc::new(InMemoryQuestionRepository::new());
        let answers: Arc<dyn AnswerRepository> = Arc::new(InMemoryAnswerRepository::new());
        let taken_quizzes: Arc<dyn TakenQuizRepository> =
            Arc::new(InMemoryTakenQuizRepository::new());

        let cascade = Arc::new(QuizCascade::new(
            quizzes.clone(),
            questions.clone(),
            answers.clone(),
            taken_quizzes.clone(),
        ));

        Self {
            user_service: UserService::new(
                users.clone(),
                quizzes.clone(),
                taken_quizzes.clone(),
                cascade.clone(),
            ),
            category_service: CategoryService::new(
                categories.clone(),
                quizzes.clone(),
                cascade.clone(),
            ),
            quiz_service: QuizService::new(
                quizzes.clone(),
                questions.clone(),
                answers.clone(),
                categories.clone(),
                users.clone(),
                cascade.clone(),
            ),
            question_service: QuestionService::new(
                questions.clone(),
                answers.clone(),
                quizzes.clone(),
            ),
            answer_service: AnswerService::new(
                answers.clone(),
                questions.clone(),
                quizzes.clone(),
            ),
            taken_quiz_service: TakenQuizService::new(
                taken_quizzes.clone(),
                quizzes.clone(),
                users.clone(),
            ),
            users,
            categories,
            quizzes,
            questions,
            answers,
            taken_quizzes,
        }
    }

    /// Insert a user directly and return the matching actor. The stored
    /// password hash is a placeholder; credential flows build their own
    /// users through `UserService::register`.
    pub async fn seed_user(&self, username: &str, role: Role) -> Actor {
        let mut user = User::new(username, username, None, "not-a-real-hash");
        user.role = role;
        let user = self.users.create(user).await.unwrap();
        Actor::new(user.id, role)
    }

    pub async fn seed_category(&self, name: &str, approved: bool) -> Category {
        let category = self
            .categories
            .create(Category::new(name, "Seeded category"))
            .await
            .unwrap();
        if approved {
            self.categories.set_approved(category.id, true).await.unwrap();
        }
        self.categories
            .find_by_id(category.id)
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn seed_quiz(
        &self,
        owner: &Actor,
        category_id: i64,
        title: &str,
        approved: bool,
    ) -> Quiz {
        let quiz = self
            .quizzes
            .create(Quiz::new(owner.id, category_id, title, "Seeded quiz"))
            .await
            .unwrap();
        if approved {
            self.quizzes.set_approved(quiz.id, true).await.unwrap();
        }
        self.quizzes.find_by_id(quiz.id).await.unwrap().unwrap()
    }

    pub async fn seed_question(&self, quiz_id: i64, text: &str) -> Question {
        self.questions
            .create(Question::new(quiz_id, text))
            .await
            .unwrap()
    }

    pub async fn seed_answer(&self, question_id: i64, text: &str, is_correct: bool) -> Answer {
        self.answers
            .create(Answer::new(question_id, text, is_correct))
            .await
            .unwrap()
    }
}
