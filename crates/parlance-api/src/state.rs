//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! Services are generic over repository/provider traits, but AppState
//! pins them to the concrete infra implementations.

use std::sync::Arc;

use secrecy::SecretString;

use parlance_core::auth::AccessGate;
use parlance_core::service::chat::ChatService;
use parlance_core::service::instruction::InstructionService;
use parlance_core::service::legacy::LegacyService;
use parlance_core::service::onboarding::OnboardingService;
use parlance_infra::llm::OllamaProvider;
use parlance_infra::sqlite::agent::SqliteAgentRepository;
use parlance_infra::sqlite::instruction::SqliteInstructionRepository;
use parlance_infra::sqlite::member::SqliteMemberRepository;
use parlance_infra::sqlite::message::SqliteMessageRepository;
use parlance_infra::sqlite::pool::{default_database_url, DatabasePool};
use parlance_infra::telegram::TelegramNotifier;

use crate::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteInstructionService =
    InstructionService<SqliteAgentRepository, SqliteInstructionRepository>;

pub type ConcreteChatService =
    ChatService<SqliteInstructionRepository, SqliteMessageRepository, OllamaProvider>;

pub type ConcreteLegacyService = LegacyService<
    SqliteAgentRepository,
    SqliteInstructionRepository,
    SqliteMessageRepository,
    OllamaProvider,
>;

pub type ConcreteOnboardingService = OnboardingService<SqliteMemberRepository, TelegramNotifier>;

/// Shared application state holding the gate and all services.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<AccessGate>,
    pub instruction_service: Arc<ConcreteInstructionService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub legacy_service: Arc<ConcreteLegacyService>,
    pub onboarding_service: Arc<ConcreteOnboardingService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the database, wire services.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db_url = match &config.database_url {
            Some(url) => url.clone(),
            None => {
                // Ensure the default data directory exists before sqlite
                // tries to create the file inside it.
                let url = default_database_url();
                if let Some(dir) = url
                    .strip_prefix("sqlite://")
                    .and_then(|path| std::path::Path::new(path).parent())
                {
                    tokio::fs::create_dir_all(dir).await?;
                }
                format!("{url}?mode=rwc")
            }
        };
        let db_pool = DatabasePool::new(&db_url).await?;

        let gate = Arc::new(AccessGate::new(&config.app_key));

        let instruction_service = InstructionService::new(
            SqliteAgentRepository::new(db_pool.clone()),
            SqliteInstructionRepository::new(db_pool.clone()),
        );

        let chat_service = ChatService::new(
            SqliteInstructionRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
            OllamaProvider::new(config.model_url.clone(), config.model_name.clone()),
        );

        let legacy_service = LegacyService::new(
            SqliteAgentRepository::new(db_pool.clone()),
            SqliteInstructionRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
            OllamaProvider::new(config.model_url.clone(), config.model_name.clone()),
        );

        let notifier = TelegramNotifier::new(
            config
                .telegram_token
                .as_deref()
                .map(SecretString::from),
        );
        if !notifier.is_enabled() {
            tracing::info!("TELEGRAM_TOKEN not set; onboarding notices disabled");
        }
        let onboarding_service =
            OnboardingService::new(SqliteMemberRepository::new(db_pool.clone()), notifier);

        Ok(Self {
            gate,
            instruction_service: Arc::new(instruction_service),
            chat_service: Arc::new(chat_service),
            legacy_service: Arc::new(legacy_service),
            onboarding_service: Arc::new(onboarding_service),
            db_pool,
        })
    }
}
