use actix_web::web;

pub mod games;
pub mod health;
pub mod questions;
pub mod rounds;

/// Register every route. Shared by `main.rs` and the route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api/questions").configure(questions::configure_routes));
    cfg.service(
        web::scope("/api/games")
            .configure(rounds::configure_routes)
            .configure(games::configure_routes),
    );
}
