//! Visibility and authorization rules, in one place.
//!
//! Every service consults this module instead of re-checking roles inline.
//! The rules fall into three groups:
//!
//! * role gates (`require_admin`) for approve/promote/demote/category
//!   management,
//! * ownership gates (`require_owner`) for quiz edits and the whole
//!   question/answer surface — deliberately without an admin override,
//! * approval visibility (`ensure_*_readable`, `listing_scope`): unapproved
//!   categories and quizzes are hidden from everyone except admins and,
//!   for quizzes, the owning user.

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::{Category, Quiz, Role},
};

/// The authenticated identity an operation runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i64, role: Role) -> Self {
        Actor { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl TryFrom<&Claims> for Actor {
    type Error = AppError;

    fn try_from(claims: &Claims) -> AppResult<Actor> {
        let id = claims
            .user_id()
            .ok_or_else(|| AppError::Unauthorized("Token subject is not a user id".to_string()))?;
        Ok(Actor::new(id, claims.role))
    }
}

/// Filter to hand to the store when listing categories or quizzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    /// Admins browse everything, approved or not.
    All,
    /// Everyone else only sees approved records.
    ApprovedOnly,
}

impl ListingScope {
    pub fn approved_only(self) -> bool {
        self == ListingScope::ApprovedOnly
    }
}

pub fn listing_scope(actor: &Actor) -> ListingScope {
    if actor.is_admin() {
        ListingScope::All
    } else {
        ListingScope::ApprovedOnly
    }
}

pub fn require_admin(actor: &Actor) -> AppResult<()> {
    if !actor.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Ownership gate with no admin override: quiz update/delete and every
/// question/answer mutation belong to the owner alone.
pub fn require_owner(actor: &Actor, owner_id: i64) -> AppResult<()> {
    if actor.id != owner_id {
        return Err(AppError::Forbidden(
            "You can only modify your own resources".to_string(),
        ));
    }
    Ok(())
}

/// A quiz is readable when approved, or by its owner, or by an admin.
pub fn ensure_quiz_readable(actor: &Actor, quiz: &Quiz) -> AppResult<()> {
    if quiz.approved || actor.is_admin() || actor.id == quiz.user_id {
        return Ok(());
    }
    Err(AppError::Forbidden(
        "You are not authorized to view this quiz".to_string(),
    ))
}

pub fn ensure_category_readable(actor: &Actor, category: &Category) -> AppResult<()> {
    if category.approved || actor.is_admin() {
        return Ok(());
    }
    Err(AppError::Forbidden(
        "You are not authorized to view this category".to_string(),
    ))
}

/// Rating is open to any authenticated actor, the owner included, but only
/// once the quiz has been approved.
pub fn ensure_quiz_ratable(quiz: &Quiz) -> AppResult<()> {
    if !quiz.approved {
        return Err(AppError::InvalidState(
            "Can't rate a quiz that is not approved".to_string(),
        ));
    }
    Ok(())
}

/// Taking a quiz requires it to be approved; unapproved quizzes are not
/// offered to takers at all.
pub fn ensure_quiz_takeable(quiz: &Quiz) -> AppResult<()> {
    if !quiz.approved {
        return Err(AppError::Forbidden(
            "You are not authorized to take this quiz; it is not approved".to_string(),
        ));
    }
    Ok(())
}
