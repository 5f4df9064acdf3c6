mod chain;
mod health;
mod mine;
pub mod models;
mod tx;

use actix_web::web::ServiceConfig;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(chain::get_chain)
        .service(chain::get_last_block)
        .service(mine::mine)
        .service(tx::new_transaction)
        .service(health::health_check);
}
