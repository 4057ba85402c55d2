mod common;

use common::TestEnv;
use quizdeck_server::{
    errors::AppError,
    models::domain::Role,
    models::dto::request::{CategoryRequest, QuizRequest},
    pagination::PageParams,
};

fn category_request(name: &str) -> CategoryRequest {
    CategoryRequest {
        name: name.to_string(),
        description: "All about the world".to_string(),
    }
}

fn quiz_request(category_id: i64, title: &str) -> QuizRequest {
    QuizRequest {
        category_id,
        title: title.to_string(),
        description: "Seeded quiz request".to_string(),
    }
}

#[tokio::test]
async fn test_new_categories_start_unapproved_and_names_are_unique() {
    let env = TestEnv::new();

    let created = env
        .category_service
        .create(category_request("Geography"))
        .await
        .unwrap();
    assert!(!created.approved);

    let duplicate = env.category_service.create(category_request("Geography")).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_unapproved_category_visible_to_admin_only() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let user = env.seed_user("janedoe", Role::User).await;
    let category = env.seed_category("Geography", false).await;

    let hidden = env.category_service.get(&user, category.id).await;
    assert!(matches!(hidden, Err(AppError::Forbidden(_))));
    env.category_service.get(&admin, category.id).await.unwrap();

    let user_page = env
        .category_service
        .list(&user, &PageParams::default())
        .await
        .unwrap();
    assert_eq!(user_page.total, 0);

    let admin_page = env
        .category_service
        .list(&admin, &PageParams::default())
        .await
        .unwrap();
    assert_eq!(admin_page.total, 1);
}

#[tokio::test]
async fn test_category_mutations_are_admin_gated() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let user = env.seed_user("janedoe", Role::User).await;
    let category = env.seed_category("Geography", false).await;

    let forbidden = env.category_service.approve(&user, category.id, true).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    env.category_service
        .approve(&admin, category.id, true)
        .await
        .unwrap();
    let approved = env.category_service.get(&user, category.id).await.unwrap();
    assert!(approved.approved);

    let forbidden = env
        .category_service
        .update(&user, category.id, category_request("History"))
        .await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    env.category_service
        .update(&admin, category.id, category_request("History"))
        .await
        .unwrap();
    let renamed = env.category_service.get(&admin, category.id).await.unwrap();
    assert_eq!(renamed.name, "History");
}

#[tokio::test]
async fn test_category_update_rejects_name_collision() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    env.seed_category("Geography", true).await;
    let other = env.seed_category("History", true).await;

    let collision = env
        .category_service
        .update(&admin, other.id, category_request("Geography"))
        .await;
    assert!(matches!(collision, Err(AppError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_category_delete_cascades_its_quizzes() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let owner = env.seed_user("janedoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    let survivor_category = env.seed_category("History", true).await;

    let quiz = env.seed_quiz(&owner, category.id, "Capitals", true).await;
    let question = env.seed_question(quiz.id, "Capital of France?").await;
    env.seed_answer(question.id, "Paris", true).await;
    let survivor = env
        .seed_quiz(&owner, survivor_category.id, "Kings", true)
        .await;

    env.category_service.delete(&admin, category.id).await.unwrap();

    assert!(env.categories.find_by_id(category.id).await.unwrap().is_none());
    assert!(env.quizzes.find_by_id(quiz.id).await.unwrap().is_none());
    assert!(env.questions.find_by_id(question.id).await.unwrap().is_none());
    assert!(env.quizzes.find_by_id(survivor.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_category_search_respects_visibility() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let user = env.seed_user("janedoe", Role::User).await;
    env.seed_category("World Geography", true).await;
    env.seed_category("Geography of Mars", false).await;
    env.seed_category("History", true).await;

    let user_page = env
        .category_service
        .search(&user, "Geography", &PageParams::default())
        .await
        .unwrap();
    assert_eq!(user_page.total, 1);

    let admin_page = env
        .category_service
        .search(&admin, "Geography", &PageParams::default())
        .await
        .unwrap();
    assert_eq!(admin_page.total, 2);
}

#[tokio::test]
async fn test_quiz_visibility_matrix() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let owner = env.seed_user("janedoe", Role::User).await;
    let stranger = env.seed_user("johndoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    let quiz = env.seed_quiz(&owner, category.id, "Capitals", false).await;

    env.quiz_service.get_detail(&owner, quiz.id).await.unwrap();
    env.quiz_service.get_detail(&admin, quiz.id).await.unwrap();
    let hidden = env.quiz_service.get_detail(&stranger, quiz.id).await;
    assert!(matches!(hidden, Err(AppError::Forbidden(_))));

    let stranger_page = env
        .quiz_service
        .list(&stranger, &PageParams::default())
        .await
        .unwrap();
    assert_eq!(stranger_page.total, 0);

    let admin_page = env
        .quiz_service
        .list(&admin, &PageParams::default())
        .await
        .unwrap();
    assert_eq!(admin_page.total, 1);

    // the owner's dashboard includes unapproved quizzes
    let own_page = env
        .quiz_service
        .list_own(&owner, &PageParams::default())
        .await
        .unwrap();
    assert_eq!(own_page.total, 1);
}

#[tokio::test]
async fn test_quiz_create_requires_existing_category() {
    let env = TestEnv::new();
    let owner = env.seed_user("janedoe", Role::User).await;

    let missing = env
        .quiz_service
        .create(&owner, quiz_request(9999, "Capitals"))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let category = env.seed_category("Geography", true).await;
    let created = env
        .quiz_service
        .create(&owner, quiz_request(category.id, "Capitals"))
        .await
        .unwrap();
    assert_eq!(created.user_id, owner.id);
    assert!(!created.approved);
}

#[tokio::test]
async fn test_quiz_update_is_owner_only_and_resets_approval() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let owner = env.seed_user("janedoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    let quiz = env.seed_quiz(&owner, category.id, "Capitals", true).await;

    // no admin override on edits
    let forbidden = env
        .quiz_service
        .update(&admin, quiz.id, quiz_request(category.id, "Renamed"))
        .await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    env.quiz_service
        .update(&owner, quiz.id, quiz_request(category.id, "Renamed"))
        .await
        .unwrap();

    let updated = env.quizzes.find_by_id(quiz.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Renamed");
    assert!(!updated.approved, "edits must go back through review");
}

#[tokio::test]
async fn test_quiz_approval_is_admin_gated() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let owner = env.seed_user("janedoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    let quiz = env.seed_quiz(&owner, category.id, "Capitals", false).await;

    let forbidden = env.quiz_service.approve(&owner, quiz.id, true).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    env.quiz_service.approve(&admin, quiz.id, true).await.unwrap();
    let approved = env.quizzes.find_by_id(quiz.id).await.unwrap().unwrap();
    assert!(approved.approved);
}

#[tokio::test]
async fn test_rating_accumulates_and_requires_approval() {
    let env = TestEnv::new();
    let owner = env.seed_user("janedoe", Role::User).await;
    let rater = env.seed_user("johndoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    let quiz = env.seed_quiz(&owner, category.id, "Capitals", false).await;

    let unapproved = env.quiz_service.rate(&rater, quiz.id, 5).await;
    assert!(matches!(unapproved, Err(AppError::InvalidState(_))));

    env.quizzes.set_approved(quiz.id, true).await.unwrap();
    env.quiz_service.rate(&rater, quiz.id, 5).await.unwrap();
    env.quiz_service.rate(&owner, quiz.id, 3).await.unwrap();

    let rated = env.quizzes.find_by_id(quiz.id).await.unwrap().unwrap();
    assert_eq!(rated.total_rate, 8.0);
    assert_eq!(rated.rate_count, 2);
    assert_eq!(rated.average_rate(), Some(4.0));
}

#[tokio::test]
async fn test_quiz_delete_is_owner_only_and_cascades() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let owner = env.seed_user("janedoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    let quiz = env.seed_quiz(&owner, category.id, "Capitals", true).await;
    let question = env.seed_question(quiz.id, "Capital of France?").await;
    env.seed_answer(question.id, "Paris", true).await;

    let forbidden = env.quiz_service.delete(&admin, quiz.id).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    env.quiz_service.delete(&owner, quiz.id).await.unwrap();
    assert!(env.quizzes.find_by_id(quiz.id).await.unwrap().is_none());
    assert!(env.questions.find_by_id(question.id).await.unwrap().is_none());
    assert!(env
        .answers
        .find_by_question_ids(&[question.id])
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_unapproved_listing_is_the_admin_review_queue() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let owner = env.seed_user("janedoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    env.seed_quiz(&owner, category.id, "Capitals", false).await;
    env.seed_quiz(&owner, category.id, "Rivers", true).await;

    let forbidden = env
        .quiz_service
        .list_unapproved(&owner, &PageParams::default())
        .await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    let queue = env
        .quiz_service
        .list_unapproved(&admin, &PageParams::default())
        .await
        .unwrap();
    assert_eq!(queue.total, 1);
    assert_eq!(queue.items[0].title, "Capitals");
}

#[tokio::test]
async fn test_search_and_category_filter_scope_to_approved() {
    let env = TestEnv::new();
    let owner = env.seed_user("janedoe", Role::User).await;
    let user = env.seed_user("johndoe", Role::User).await;
    let geography = env.seed_category("Geography", true).await;
    let history = env.seed_category("History", true).await;
    env.seed_quiz(&owner, geography.id, "World Capitals", true).await;
    env.seed_quiz(&owner, geography.id, "Capitals of Asia", false).await;
    env.seed_quiz(&owner, history.id, "Roman Emperors", true).await;

    let search = env
        .quiz_service
        .search(&user, "Capitals", &PageParams::default())
        .await
        .unwrap();
    assert_eq!(search.total, 1);
    assert_eq!(search.items[0].title, "World Capitals");

    let by_category = env
        .quiz_service
        .list_by_category(&user, geography.id, &PageParams::default())
        .await
        .unwrap();
    assert_eq!(by_category.total, 1);

    let missing_category = env
        .quiz_service
        .list_by_category(&user, 9999, &PageParams::default())
        .await;
    assert!(matches!(missing_category, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_list_by_user_scopes_to_approved_for_strangers() {
    let env = TestEnv::new();
    let admin = env.seed_user("adminUser", Role::Admin).await;
    let owner = env.seed_user("janedoe", Role::User).await;
    let stranger = env.seed_user("johndoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    env.seed_quiz(&owner, category.id, "Capitals", true).await;
    env.seed_quiz(&owner, category.id, "Rivers", false).await;

    let public = env
        .quiz_service
        .list_by_user(&stranger, owner.id, &PageParams::default())
        .await
        .unwrap();
    assert_eq!(public.total, 1);

    let full = env
        .quiz_service
        .list_by_user(&admin, owner.id, &PageParams::default())
        .await
        .unwrap();
    assert_eq!(full.total, 2);

    let missing = env
        .quiz_service
        .list_by_user(&stranger, 9999, &PageParams::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_pagination_windows_and_totals() {
    let env = TestEnv::new();
    let owner = env.seed_user("janedoe", Role::User).await;
    let user = env.seed_user("johndoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    for i in 0..25 {
        env.seed_quiz(&owner, category.id, &format!("Quiz {:02}", i), true)
            .await;
    }

    let first = env
        .quiz_service
        .list(
            &user,
            &PageParams {
                page: Some(1),
                size: Some(10),
            },
        )
        .await
        .unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total, 25);
    assert_eq!(first.pages, 3);
    assert_eq!(first.items[0].title, "Quiz 00");

    let last = env
        .quiz_service
        .list(
            &user,
            &PageParams {
                page: Some(3),
                size: Some(10),
            },
        )
        .await
        .unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.page, 3);

    // a window past the end is empty but keeps the counts
    let past_end = env
        .quiz_service
        .list(
            &user,
            &PageParams {
                page: Some(4),
                size: Some(10),
            },
        )
        .await
        .unwrap();
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.total, 25);
    assert_eq!(past_end.pages, 3);
}

#[tokio::test]
async fn test_quiz_detail_assembles_the_whole_graph() {
    let env = TestEnv::new();
    let owner = env.seed_user("janedoe", Role::User).await;
    let category = env.seed_category("Geography", true).await;
    let quiz = env.seed_quiz(&owner, category.id, "Capitals", true).await;
    let q1 = env.seed_question(quiz.id, "Capital of France?").await;
    let q2 = env.seed_question(quiz.id, "Capital of Japan?").await;
    env.seed_answer(q1.id, "Paris", true).await;
    env.seed_answer(q1.id, "Lyon", false).await;
    env.seed_answer(q2.id, "Tokyo", true).await;

    let detail = env.quiz_service.get_detail(&owner, quiz.id).await.unwrap();

    assert_eq!(detail.owner.id, owner.id);
    assert_eq!(detail.category.id, category.id);
    assert_eq!(detail.questions.len(), 2);
    assert_eq!(detail.questions[0].answers.len(), 2);
    assert_eq!(detail.questions[1].answers.len(), 1);
    assert_eq!(detail.questions[1].answers[0].text, "Tokyo");
}
