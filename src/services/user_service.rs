use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::password::{hash_password, verify_password},
    authz::{self, Actor},
    errors::{AppError, AppResult},
    models::{
        domain::{Role, User},
        dto::{
            request::{PasswordUpdateRequest, RegisterRequest, UserUpdateRequest},
            response::UserProfile,
        },
    },
    pagination::{Page, PageParams},
    repositories::{QuizFilter, QuizRepository, TakenQuizRepository, UserRepository},
    services::cascade::QuizCascade,
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    quizzes: Arc<dyn QuizRepository>,
    taken_quizzes: Arc<dyn TakenQuizRepository>,
    cascade: Arc<QuizCascade>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        quizzes: Arc<dyn QuizRepository>,
        taken_quizzes: Arc<dyn TakenQuizRepository>,
        cascade: Arc<QuizCascade>,
    ) -> Self {
        Self {
            users,
            quizzes,
            taken_quizzes,
            cascade,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(
            &request.display_name,
            &request.username,
            request.about,
            &password_hash,
        );
        self.users.create(user).await
    }

    /// Credential check for token issuance. The same error covers an
    /// unknown username and a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !verify_password(password, &user.password)? {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(user)
    }

    pub async fn get_profile(&self, actor: &Actor) -> AppResult<UserProfile> {
        let user = self.require_user(actor.id).await?;
        Ok(user.into())
    }

    pub async fn get_user(&self, id: i64) -> AppResult<UserProfile> {
        let user = self.require_user(id).await?;
        Ok(user.into())
    }

    pub async fn list_users(&self, params: &PageParams) -> AppResult<Page<UserProfile>> {
        let (users, total) = self.users.list(params.offset(), params.size()).await?;
        let profiles = users.into_iter().map(UserProfile::from).collect();
        Ok(Page::new(profiles, total, params))
    }

    pub async fn update_profile(&self, actor: &Actor, request: UserUpdateRequest) -> AppResult<()> {
        request.validate()?;
        self.users
            .update_profile(actor.id, &request.display_name, request.about)
            .await
    }

    pub async fn change_password(
        &self,
        actor: &Actor,
        request: PasswordUpdateRequest,
    ) -> AppResult<()> {
        request.validate()?;

        let user = self.require_user(actor.id).await?;

        if !verify_password(&request.current_password, &user.password)? {
            return Err(AppError::InvalidState("Incorrect password".to_string()));
        }
        if verify_password(&request.new_password, &user.password)? {
            return Err(AppError::InvalidState(
                "Use a different password".to_string(),
            ));
        }

        let new_hash = hash_password(&request.new_password)?;
        self.users.update_password(actor.id, &new_hash).await
    }

    pub async fn promote(&self, actor: &Actor, target_id: i64) -> AppResult<()> {
        authz::require_admin(actor)?;
        self.require_user(target_id).await?;
        self.users.set_role(target_id, Role::Admin).await
    }

    pub async fn demote(&self, actor: &Actor, target_id: i64) -> AppResult<()> {
        authz::require_admin(actor)?;
        self.require_user(target_id).await?;
        self.users.set_role(target_id, Role::User).await
    }

    /// Delete the actor's own account and everything hanging off it: their
    /// quizzes (with question/answer/taken graphs) and their own history.
    pub async fn delete_account(&self, actor: &Actor) -> AppResult<()> {
        self.require_user(actor.id).await?;

        let owned = QuizFilter {
            owner_id: Some(actor.id),
            ..QuizFilter::default()
        };
        let quiz_ids = self.quizzes.find_ids(&owned).await?;
        self.cascade.delete_quizzes(&quiz_ids).await?;
        self.taken_quizzes.delete_by_user(actor.id).await?;
        self.users.delete(actor.id).await
    }

    pub async fn require_user(&self, id: i64) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }
}
