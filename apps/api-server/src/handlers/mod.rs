//! HTTP handlers and route configuration.

mod auth;
mod health;
mod petitions;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Petition routes. Fixed segments are registered before the
            // `{id}` matchers.
            .service(
                web::scope("/petitions")
                    .route("", web::post().to(petitions::create_petition))
                    .route("", web::get().to(petitions::get_ongoing_petitions))
                    .route("/search", web::get().to(petitions::search_petitions))
                    .route(
                        "/view/end-date",
                        web::get().to(petitions::end_date_petitions),
                    )
                    .route(
                        "/view/likes-count",
                        web::get().to(petitions::likes_count_petitions),
                    )
                    .route(
                        "/view/increased",
                        web::get().to(petitions::increased_petitions),
                    )
                    .route(
                        "/view/category/{category}",
                        web::get().to(petitions::random_category_petitions),
                    )
                    .route(
                        "/category/{category}",
                        web::get().to(petitions::petitions_by_category),
                    )
                    .route("/{id}/like", web::post().to(petitions::toggle_like))
                    .route("/{id}", web::get().to(petitions::get_petition_by_id))
                    .route("/{id}", web::put().to(petitions::update_petition))
                    .route("/{id}", web::delete().to(petitions::delete_petition)),
            ),
    );
}
