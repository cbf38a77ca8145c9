pub mod code;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod scenarios;
pub mod state;

pub use code::{is_valid_code, CodeKind};
pub use config::Config;
pub use db::{init_pool, run_migrations, CountryStorage};
pub use error::CountryError;
pub use models::{Country, CreateCountryRequest, UpdateCountryRequest};
pub use repository::CountryRepository;
pub use routes::create_router;
pub use scenarios::CountryScenarios;
pub use state::AppState;
