//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    BillingService, BookingService, PaymentService, RentalService, ReviewService, UserService,
    VehicleService,
};
use crate::config::BookingConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    auth, billings, health, metrics, payments, rentals, request_id, reviews, users, vehicles,
};

/// Everything the router needs from the outside
#[derive(Clone)]
pub struct ApiDependencies {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
    pub booking: BookingConfig,
    /// `None` when running on the in-memory store
    pub db: Option<DatabaseConnection>,
    pub metrics_handle: PrometheusHandle,
}

/// Router state. Each handler module extracts its own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub auth: AuthState,
    pub user_service: Arc<UserService>,
    pub vehicle_service: Arc<VehicleService>,
    pub booking_service: Arc<BookingService>,
    pub rental_service: Arc<RentalService>,
    pub payment_service: Arc<PaymentService>,
    pub review_service: Arc<ReviewService>,
    pub billing_service: Arc<BillingService>,
    pub health: health::HealthState,
    pub metrics: metrics::MetricsState,
}

impl ApiState {
    pub fn new(deps: ApiDependencies) -> Self {
        let repos = deps.repos;
        Self {
            auth: AuthState {
                jwt_config: deps.jwt_config.clone(),
            },
            user_service: Arc::new(UserService::new(repos.clone(), deps.jwt_config)),
            vehicle_service: Arc::new(VehicleService::new(repos.clone())),
            booking_service: Arc::new(BookingService::new(repos.clone(), deps.booking)),
            rental_service: Arc::new(RentalService::new(repos.clone())),
            payment_service: Arc::new(PaymentService::new(repos.clone())),
            review_service: Arc::new(ReviewService::new(repos.clone())),
            billing_service: Arc::new(BillingService::new(repos)),
            health: health::HealthState {
                db: deps.db,
                started_at: Arc::new(Instant::now()),
            },
            metrics: metrics::MetricsState {
                handle: deps.metrics_handle,
            },
        }
    }
}

// -- FromRef so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for AuthState {
    fn from_ref(s: &ApiState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<ApiState> for auth::AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<ApiState> for users::UserHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<ApiState> for vehicles::VehicleHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            vehicle_service: Arc::clone(&s.vehicle_service),
        }
    }
}

impl FromRef<ApiState> for rentals::RentalHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            rental_service: Arc::clone(&s.rental_service),
            booking_service: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<ApiState> for payments::PaymentHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            payment_service: Arc::clone(&s.payment_service),
        }
    }
}

impl FromRef<ApiState> for reviews::ReviewHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            review_service: Arc::clone(&s.review_service),
        }
    }
}

impl FromRef<ApiState> for billings::BillingHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        Self {
            billing_service: Arc::clone(&s.billing_service),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        s.health.clone()
    }
}

impl FromRef<ApiState> for metrics::MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        s.metrics.clone()
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        auth::update_current_user,
        auth::change_password,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        vehicles::quote_vehicle,
        // Rentals
        rentals::create_rental,
        rentals::list_rentals,
        rentals::get_rental,
        rentals::update_rental,
        rentals::delete_rental,
        // Payments
        payments::list_payments,
        payments::get_payment,
        payments::create_payment,
        payments::update_payment,
        payments::delete_payment,
        // Reviews
        reviews::list_reviews,
        reviews::get_review,
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        // Billings
        billings::list_billings,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginatedResponse<vehicles::VehicleDto>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UpdateProfileRequest,
            auth::ChangePasswordRequest,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            vehicles::VehicleDto,
            vehicles::CreateVehicleRequest,
            vehicles::UpdateVehicleRequest,
            vehicles::QuoteRequest,
            vehicles::QuoteResponse,
            rentals::RentalDto,
            rentals::CreateRentalRequest,
            rentals::UpdateRentalRequest,
            rentals::BookingResponse,
            payments::PaymentDto,
            payments::CreatePaymentRequest,
            payments::UpdatePaymentRequest,
            reviews::ReviewDto,
            reviews::CreateReviewRequest,
            reviews::UpdateReviewRequest,
            billings::BillingItemDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration, login (JWT), profile and password"),
        (name = "Users", description = "User administration (admin only)"),
        (name = "Vehicles", description = "Fleet catalogue and rental price quotes"),
        (name = "Rentals", description = "Booking and rental management"),
        (name = "Payments", description = "Rental payments"),
        (name = "Reviews", description = "Rental reviews"),
        (name = "Billings", description = "Billing history per user"),
    ),
    info(
        title = "Car Rental API",
        version = "1.0.0",
        description = "REST API for vehicle rentals: fleet, quotes, bookings, payments and reviews"
    )
)]
pub struct ApiDoc;

/// Build the full HTTP router: `/health`, `/metrics`, Swagger UI and `/api/v1/*`.
pub fn create_api_router(deps: ApiDependencies) -> Router {
    let state = ApiState::new(deps);
    let auth_state = state.auth.clone();

    // Authenticated routes, any role
    let authenticated = Router::new()
        .route(
            "/auth/me",
            get(auth::get_current_user).put(auth::update_current_user),
        )
        .route("/auth/change-password", put(auth::change_password))
        .route(
            "/rentals",
            get(rentals::list_rentals).post(rentals::create_rental),
        )
        .route("/rentals/{id}", get(rentals::get_rental))
        .route("/payments", get(payments::list_payments))
        .route("/payments/{id}", get(payments::get_payment))
        .route("/reviews", post(reviews::create_review))
        .route(
            "/reviews/{id}",
            put(reviews::update_review).delete(reviews::delete_review),
        )
        .route("/billings", get(billings::list_billings))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));

    // Admin routes: auth runs first, then the role check
    let admin = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/vehicles", post(vehicles::create_vehicle))
        .route(
            "/vehicles/{id}",
            put(vehicles::update_vehicle).delete(vehicles::delete_vehicle),
        )
        .route(
            "/rentals/{id}",
            put(rentals::update_rental).delete(rentals::delete_rental),
        )
        .route("/payments", post(payments::create_payment))
        .route(
            "/payments/{id}",
            put(payments::update_payment).delete(payments::delete_payment),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/vehicles", get(vehicles::list_vehicles))
        .route("/vehicles/{id}", get(vehicles::get_vehicle))
        .route("/vehicles/{id}/quote", post(vehicles::quote_vehicle))
        .route("/reviews", get(reviews::list_reviews))
        .route("/reviews/{id}", get(reviews::get_review));

    // route_layer so the matched route template is visible to the metrics middleware
    let api_v1 = public
        .merge(authenticated)
        .merge(admin)
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        .nest("/api/v1", api_v1)
        .merge(swagger_routes)
        .with_state(state)
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
