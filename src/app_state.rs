use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::{
    auth::{hash_password, JwtService},
    config::Config,
    db::Database,
    errors::AppResult,
    models::domain::{Role, User},
    repositories::{
        AnswerRepository, CategoryRepository, MongoAnswerRepository, MongoCategoryRepository,
        MongoQuestionRepository, MongoQuizRepository, MongoTakenQuizRepository,
        MongoUserRepository, QuestionRepository, QuizRepository, TakenQuizRepository,
        UserRepository,
    },
    services::{
        AnswerService, CategoryService, QuestionService, QuizCascade, QuizService,
        TakenQuizService, UserService,
    },
};

/// Shared application state handed to every handler.
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub category_service: Arc<CategoryService>,
    pub quiz_service: Arc<QuizService>,
    pub question_service: Arc<QuestionService>,
    pub answer_service: Arc<AnswerService>,
    pub taken_quiz_service: Arc<TakenQuizService>,
    pub jwt_service: JwtService,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repo = MongoUserRepository::new(&db);
        let category_repo = MongoCategoryRepository::new(&db);
        let quiz_repo = MongoQuizRepository::new(&db);
        let question_repo = MongoQuestionRepository::new(&db);
        let answer_repo = MongoAnswerRepository::new(&db);
        let taken_quiz_repo = MongoTakenQuizRepository::new(&db);

        user_repo.ensure_indexes().await?;
        category_repo.ensure_indexes().await?;
        quiz_repo.ensure_indexes().await?;
        question_repo.ensure_indexes().await?;
        answer_repo.ensure_indexes().await?;
        taken_quiz_repo.ensure_indexes().await?;

        let users: Arc<dyn UserRepository> = Arc::new(user_repo);
        let categories: Arc<dyn CategoryRepository> = Arc::new(category_repo);
        let quizzes: Arc<dyn QuizRepository> = Arc::new(quiz_repo);
        let questions: Arc<dyn QuestionRepository> = Arc::new(question_repo);
        let answers: Arc<dyn AnswerRepository> = Arc::new(answer_repo);
        let taken_quizzes: Arc<dyn TakenQuizRepository> = Arc::new(taken_quiz_repo);

        bootstrap_admin(users.as_ref(), &config).await?;

        let cascade = Arc::new(QuizCascade::new(
            quizzes.clone(),
            questions.clone(),
            answers.clone(),
            taken_quizzes.clone(),
        ));

        let user_service = Arc::new(UserService::new(
            users.clone(),
            quizzes.clone(),
            taken_quizzes.clone(),
            cascade.clone(),
        ));
        let category_service = Arc::new(CategoryService::new(
            categories.clone(),
            quizzes.clone(),
            cascade.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(
            quizzes.clone(),
            questions.clone(),
            answers.clone(),
            categories.clone(),
            users.clone(),
            cascade.clone(),
        ));
        let question_service = Arc::new(QuestionService::new(
            questions.clone(),
            answers.clone(),
            quizzes.clone(),
        ));
        let answer_service = Arc::new(AnswerService::new(
            answers.clone(),
            questions.clone(),
            quizzes.clone(),
        ));
        let taken_quiz_service = Arc::new(TakenQuizService::new(
            taken_quizzes.clone(),
            quizzes.clone(),
            users.clone(),
        ));

        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Ok(Self {
            user_service,
            category_service,
            quiz_service,
            question_service,
            answer_service,
            taken_quiz_service,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}

/// Create the administrator account on first startup. Existing accounts are
/// left untouched so password rotations survive restarts.
async fn bootstrap_admin(users: &dyn UserRepository, config: &Config) -> AppResult<()> {
    if users.find_by_username(&config.admin_username).await?.is_some() {
        log::debug!("Admin account '{}' already present", config.admin_username);
        return Ok(());
    }

    let hash = hash_password(config.admin_password.expose_secret())?;
    let mut admin = User::new(
        &config.admin_display_name,
        &config.admin_username,
        None,
        &hash,
    );
    admin.role = Role::Admin;
    let admin = users.create(admin).await?;
    log::info!(
        "Bootstrapped admin account '{}' (id {})",
        admin.username,
        admin.id
    );
    Ok(())
}
