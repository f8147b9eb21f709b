use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use dotenv::dotenv;
use log::{error, info};
use lru::LruCache;
use parking_lot::Mutex;
use std::io;
use std::num::NonZeroUsize;
use std::sync::Arc;

use cart_optimizer::config::ServerConfig;
use cart_optimizer::{
    create_solver, optimize_cart, CartError, OptimizeRequest, SolutionPlan, Solver, SolverError,
    SolverType,
};

// ---------- Shared state ----------

struct AppState {
    solver: Arc<dyn Solver>,
    solver_type: SolverType,
    cache: Option<Mutex<LruCache<String, SolutionPlan>>>,
}

impl AppState {
    fn new(config: &ServerConfig) -> Self {
        let solver = create_solver(config.solver, config.solver_timeout);
        Self::with_solver(Arc::from(solver), config.solver, config.cache_size)
    }

    fn with_solver(solver: Arc<dyn Solver>, solver_type: SolverType, cache_size: usize) -> Self {
        AppState {
            solver,
            solver_type,
            cache: NonZeroUsize::new(cache_size).map(|size| Mutex::new(LruCache::new(size))),
        }
    }

    fn cached(&self, key: &str) -> Option<SolutionPlan> {
        self.cache.as_ref()?.lock().get(key).cloned()
    }

    fn remember(&self, key: String, plan: &SolutionPlan) {
        if let Some(cache) = &self.cache {
            cache.lock().put(key, plan.clone());
        }
    }
}

fn error_response(status: StatusCode, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message.to_string() }))
}

// ---------- Route handlers ----------

/// POST /optimize
async fn optimize(
    state: web::Data<AppState>,
    req: web::Json<OptimizeRequest>,
) -> impl Responder {
    let request = req.into_inner();

    // BTreeMap catalogs make the serialized request a stable key
    let cache_key = match &state.cache {
        Some(_) => serde_json::to_string(&request).ok(),
        None => None,
    };
    if let Some(plan) = cache_key.as_deref().and_then(|key| state.cached(key)) {
        return HttpResponse::Ok().json(plan);
    }

    let solver = Arc::clone(&state.solver);
    let outcome = web::block(move || {
        optimize_cart(solver.as_ref(), &request.wanted_items, &request.sellers)
    })
    .await;

    match outcome {
        Ok(Ok(plan)) => {
            if let Some(key) = cache_key {
                state.remember(key, &plan);
            }
            HttpResponse::Ok().json(plan)
        }
        Ok(Err(err @ CartError::InvalidInput(_))) => {
            error_response(StatusCode::BAD_REQUEST, err)
        }
        Ok(Err(err @ CartError::Solver(SolverError::Timeout(_)))) => {
            error!("{}: {}", state.solver.name(), err);
            error_response(StatusCode::GATEWAY_TIMEOUT, err)
        }
        Ok(Err(err @ CartError::Solver(_))) => {
            error!("{} failed: {}", state.solver.name(), err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err)
        }
        Err(err) => {
            error!("Solver task failed: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
        }
    }
}

/// GET /solvers
async fn solvers(state: web::Data<AppState>) -> impl Responder {
    let available: Vec<&str> = SolverType::available().iter().map(|s| s.as_str()).collect();
    HttpResponse::Ok().json(serde_json::json!({
        "active": state.solver_type.as_str(),
        "available": available,
    }))
}

/// GET /health
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/optimize", web::post().to(optimize))
        .route("/solvers", web::get().to(solvers))
        .route("/health", web::get().to(health_check));
}

// ---------- Server bootstrap ----------

async fn run(config: ServerConfig) -> io::Result<()> {
    let state = web::Data::new(AppState::new(&config));
    let json_limit = config.json_limit;

    info!(
        "Starting server on http://127.0.0.1:{} with solver {}",
        config.port,
        state.solver.name(),
    );
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(sentry_actix::Sentry::new())
            .app_data(state.clone())
            .app_data(
                web::JsonConfig::default()
                    .limit(json_limit)
                    .error_handler(|err, _| {
                        let err_string = err.to_string();
                        actix_web::error::InternalError::from_response(
                            err,
                            HttpResponse::BadRequest()
                                .json(serde_json::json!({ "error": err_string })),
                        )
                        .into()
                    }),
            )
            .configure(routes)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}

fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config =
        ServerConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Sentry has to start before the runtime so its hub covers worker threads
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    actix_web::rt::System::new().block_on(run(config))
}
