use rocket::{
    data::{Limits, ToByteUnit},
    fs::FileServer,
    launch, routes, Build, Rocket,
};

mod assets;
mod config;
mod cors;
mod database;
mod extraction;
mod leaderboard;
mod ocr;
mod requests;
#[cfg(test)]
mod tests;

use assets::Assets;
use config::Config;
use extraction::ScoreRules;
use ocr::{Recognizer, Tesseract};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to connect to the database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to prepare the public directory: {0}")]
    PublicDir(#[from] std::io::Error),
}

#[launch]
async fn rocket() -> _ {
    let config = Config::from_env().expect("invalid configuration");
    let recognizer: Recognizer = Box::new(Tesseract::new(&config.ocr));
    let assets = assets::from_config(&config);

    build(config, recognizer, assets)
        .await
        .expect("failed to build the server")
}

/// Wires the database, asset store, ocr engine and routes together.
pub async fn build(
    config: Config,
    recognizer: Recognizer,
    assets: Assets,
) -> Result<Rocket<Build>, StartupError> {
    // Connect to a database
    let database_pool =
        database::connect(&config.database_url, config.database_max_connections).await?;

    std::fs::create_dir_all(&config.public_dir)?;

    let upload_limit = config.upload_limit_mib.mebibytes();
    let limits = Limits::default()
        .limit("data-form", upload_limit)
        .limit("file", upload_limit)
        .limit("json", upload_limit);
    let figment = rocket::Config::figment().merge(("limits", limits));

    // Build the rocket
    Ok(rocket::custom(figment)
        .mount("/", requests::routes())
        .mount("/", routes![cors::preflight])
        .mount("/", FileServer::from(&config.public_dir))
        .register("/", requests::catchers())
        .attach(cors::Cors)
        .manage(database_pool)
        .manage(recognizer)
        .manage(assets)
        .manage(ScoreRules::standard())
        .manage(config))
}
