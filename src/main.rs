use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use parking_lot_api::config::environment::EnvironmentConfig;
use parking_lot_api::routes::docs_routes::ROUTES;
use parking_lot_api::{create_router, database, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging; en desarrollo se ve el detalle de requests y handlers
    let default_filter = if config.is_development() {
        "parking_lot_api=debug,tower_http=debug,info"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("🅿️ Parking Lot API ({})", config.environment);
    info!("================================================");

    // Inicializar base de datos
    let pool = match database::connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    database::run_migrations(&pool).await?;

    let addr: SocketAddr = config.server_url().parse()?;
    let admin = config.admin.clone();
    let state = AppState::with_pool(pool, config);

    if let Some(admin) = admin {
        match state.auth.ensure_user(&admin.email, &admin.password).await {
            Ok(true) => info!("👤 Usuario inicial creado: {}", admin.email),
            Ok(false) => info!("👤 Usuario inicial ya existe: {}", admin.email),
            Err(e) => {
                error!("❌ Error creando usuario inicial: {}", e);
                return Err(e.into());
            }
        }
    }

    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    for (method, path, summary) in ROUTES {
        info!("   {:<6} {} - {}", method, path, summary);
    }
    info!("   GET    /v3/api-docs - Descripción de la API (sin autenticación)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
