use database::{DatabaseConnectionInfo, PgDatabase};
use web::{bind_address_from_env, start_web_server, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // database
    let database_connection_info = DatabaseConnectionInfo::from_env()
        .expect("expected database connection info in env.");
    let database = PgDatabase::connect(database_connection_info)
        .await
        .expect("could not connect to database.");

    // web server
    if let Err(why) = start_web_server(WebState::new(database), &bind_address_from_env()).await {
        log::error!("web server stopped: {}", why);
    }
}
