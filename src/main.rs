use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizdeck_server::{app_state::AppState, auth::AuthMiddleware, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    config.validate_for_production();

    let state = AppState::new(config.clone())
        .await
        .unwrap_or_else(|e| panic!("Failed to initialize application state: {}", e));

    let jwt_service = web::Data::new(state.jwt_service.clone());
    let state = web::Data::new(state);

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    log::info!("Starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(jwt_service.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(handlers::register)
            .service(handlers::login)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    // user
                    .service(handlers::get_all_users)
                    .service(handlers::get_user_by_id)
                    .service(handlers::change_password)
                    .service(handlers::promote_user)
                    .service(handlers::demote_user)
                    .service(handlers::get_profile)
                    .service(handlers::update_profile)
                    .service(handlers::delete_account)
                    // category
                    .service(handlers::search_categories)
                    .service(handlers::approve_category)
                    .service(handlers::get_categories)
                    .service(handlers::create_category)
                    .service(handlers::get_category)
                    .service(handlers::update_category)
                    .service(handlers::delete_category)
                    // quiz: fixed paths before the {id} routes
                    .service(handlers::get_own_quizzes)
                    .service(handlers::search_quizzes)
                    .service(handlers::get_unapproved_quizzes)
                    .service(handlers::filter_quizzes)
                    .service(handlers::get_user_quizzes)
                    .service(handlers::rate_quiz)
                    .service(handlers::approve_quiz)
                    .service(handlers::get_quizzes)
                    .service(handlers::create_quiz)
                    .service(handlers::get_quiz)
                    .service(handlers::update_quiz)
                    .service(handlers::delete_quiz)
                    // question
                    .service(handlers::bulk_delete_questions)
                    .service(handlers::create_question)
                    .service(handlers::update_question)
                    .service(handlers::delete_question)
                    // answer
                    .service(handlers::bulk_create_answers)
                    .service(handlers::bulk_delete_answers)
                    .service(handlers::create_answer)
                    .service(handlers::update_answer)
                    .service(handlers::delete_answer)
                    // taken quiz
                    .service(handlers::get_user_history)
                    .service(handlers::get_own_history)
                    .service(handlers::record_taken_quiz),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
