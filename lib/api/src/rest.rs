use crate::form::normalize_input;
use crate::state::AppState;
use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError, UrlencodedError};
use actix_web::{web, App, Either, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use resrec_core::{Error, Field, PredictionRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
struct RecommendRequest {
    city: String,
    cuisine: String,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct OptionsResponse {
    cities: Vec<String>,
    cuisines: Vec<String>,
}

type PredictBody = Either<web::Json<PredictionRequest>, web::Form<PredictionRequest>>;
type RecommendBody = Either<web::Json<RecommendRequest>, web::Form<RecommendRequest>>;

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>) -> std::io::Result<()> {
        let bind = (state.config.host.clone(), state.config.port);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(routes)
        })
        .bind(bind)?
        .run()
        .await
    }
}

/// Register every endpoint. Expects `web::Data<Arc<AppState>>` in app data.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(options))
        .route("/healthz", web::get().to(health))
        .service(
            web::resource("/predict")
                .app_data(json_config("prediction unavailable"))
                .app_data(form_config("prediction unavailable"))
                .route(web::post().to(predict)),
        )
        .service(
            web::resource("/recommend")
                .app_data(json_config("recommendation unavailable"))
                .app_data(form_config("recommendation unavailable"))
                .route(web::post().to(recommend)),
        );
}

/// Unreadable bodies answer with the same `{"error": ...}` shape as the handlers.
fn json_config(context: &'static str) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err: JsonPayloadError, _req: &HttpRequest| {
        let response = bad_body(context, &err);
        InternalError::from_response(err, response).into()
    })
}

fn form_config(context: &'static str) -> web::FormConfig {
    web::FormConfig::default().error_handler(move |err: UrlencodedError, _req: &HttpRequest| {
        let response = bad_body(context, &err);
        InternalError::from_response(err, response).into()
    })
}

fn bad_body(context: &str, err: &dyn std::fmt::Display) -> HttpResponse {
    tracing::debug!(error = %err, "rejected request body");
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": format!("{}: {}", context, err)
    }))
}

async fn options(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    let response = match &state.catalog {
        Some(catalog) => OptionsResponse {
            cities: catalog.cities(),
            cuisines: catalog.cuisines(),
        },
        None => {
            let vocabulary = state.predictor.vocabulary();
            OptionsResponse {
                cities: vocabulary.values(Field::City).to_vec(),
                cuisines: vocabulary.values(Field::Cuisine).to_vec(),
            }
        }
    };
    Ok(HttpResponse::Ok().json(response))
}

async fn health(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "features": state.predictor.schema().len(),
        "restaurants": state.catalog.as_ref().map(|c| c.len()),
    })))
}

async fn predict(
    state: web::Data<Arc<AppState>>,
    body: PredictBody,
) -> ActixResult<HttpResponse> {
    let raw = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    let request = PredictionRequest {
        city: raw.city.as_deref().map(normalize_input),
        cuisine: raw.cuisine.as_deref().map(normalize_input),
    };

    let prediction = match state.predictor.predict(&request) {
        Ok(prediction) => prediction,
        Err(e) => {
            tracing::error!(error = %e, "prediction failed");
            return Ok(prediction_unavailable(&e));
        }
    };

    let restaurants = state.catalog.as_ref().map(|catalog| {
        catalog.recommend_names(
            prediction.record.get(Field::City),
            prediction.record.get(Field::Cuisine),
            state.config.recommend_limit,
        )
    });

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": {
            "score": prediction.score,
            "record": prediction.record,
            "substitutions": prediction.substitutions,
            "restaurants": restaurants,
        }
    })))
}

async fn recommend(
    state: web::Data<Arc<AppState>>,
    body: RecommendBody,
) -> ActixResult<HttpResponse> {
    let req = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };

    let catalog = match &state.catalog {
        Some(c) => c,
        None => {
            return Ok(HttpResponse::NotFound().json(serde_json::json!({
                "error": "No restaurant dataset loaded"
            })));
        }
    };

    let limit = req.limit.unwrap_or(state.config.recommend_limit);
    let names = catalog.recommend_names(
        &normalize_input(&req.city),
        &normalize_input(&req.cuisine),
        limit,
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": names
    })))
}

fn prediction_unavailable(error: &Error) -> HttpResponse {
    let body = serde_json::json!({
        "error": format!("prediction unavailable: {}", error)
    });
    match error {
        Error::Encoding(_) | Error::SchemaMismatch { .. } => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        _ => HttpResponse::InternalServerError().json(body),
    }
}
