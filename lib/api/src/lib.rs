//! # resrec API
//!
//! REST surface of the resrec service.
//!
//! | Method | Path         | Description                                   |
//! |--------|--------------|-----------------------------------------------|
//! | GET    | `/`          | Cities and cuisines offered by the form       |
//! | GET    | `/healthz`   | Liveness and loaded model size                |
//! | POST   | `/predict`   | Popularity score for a city and a cuisine     |
//! | POST   | `/recommend` | Top restaurants for a city and a cuisine      |
//!
//! `/predict` and `/recommend` accept JSON or urlencoded form bodies.

pub mod form;
pub mod rest;
pub mod state;

pub use form::normalize_input;
pub use rest::{routes, RestApi};
pub use state::{ApiConfig, AppState};
