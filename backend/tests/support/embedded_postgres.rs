//! Embedded PostgreSQL databases for the Diesel adapter suites.
//!
//! One cluster is shared per test process. A template database carrying the
//! current migrations is created once and cloned for every test, so each
//! suite starts from an empty, fully migrated schema.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip these suites where no cluster can run.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use forum_backend::domain::ports::{AnswerRepository, QuestionRepository, UserRepository};
use forum_backend::domain::{
    Answer, NewAnswer, NewQuestion, NewUser, PasswordHash, Question, QuestionId, User, UserId,
};
use forum_backend::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselQuestionRepository, DieselUserRepository, PoolConfig,
};
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const TEMPLATE_NAME_PREFIX: &str = "forum_template";

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn pg_embed_dirs() -> Result<(String, String), String> {
    let target = std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"),
        PathBuf::from,
    );
    let base = target
        .join("pg-embed")
        .join(format!("bootstrap-{}", std::process::id()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir).map_err(|err| err.to_string())?;
    std::fs::create_dir_all(&data_dir).map_err(|err| err.to_string())?;
    Ok((
        runtime_dir.to_string_lossy().into_owned(),
        data_dir.to_string_lossy().into_owned(),
    ))
}

/// Start, or reuse, the process-wide cluster.
///
/// When `PG_RUNTIME_DIR`/`PG_DATA_DIR` are unset, both point under the
/// target directory for the duration of the bootstrap.
fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = pg_embed_dirs()?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir)),
            ("PG_DATA_DIR", Some(data_dir)),
        ]))
    } else {
        None
    };

    pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("start shared cluster: {err:?}"))
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| format!("migrate: {err}"))?;
    Ok(())
}

/// Create the migrated template unless it already exists.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }
    Ok(template_name)
}

/// Clone a fresh database from the migrated template.
pub fn provision_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster()?;
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))
}

/// Returns true when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// A migrated database with a pool and the runtime that drives it.
pub struct DieselWorld {
    /// Runtime reused for every async call in one test.
    pub runtime: Runtime,
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

impl DieselWorld {
    fn setup() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let database = provision_database()?;
        let config = PoolConfig::new(database.url())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;
        Ok(Self {
            runtime,
            pool,
            _database: database,
        })
    }

    /// Provision a world, or skip the test per `SKIP_TEST_CLUSTER`.
    pub fn provision() -> Option<Self> {
        assert!(
            tokio::runtime::Handle::try_current().is_err(),
            "provision the cluster outside a Tokio runtime"
        );
        match Self::setup() {
            Ok(world) => Some(world),
            Err(reason) => handle_cluster_setup_failure(reason),
        }
    }
}

pub async fn register(pool: &DbPool, name: &str) -> User {
    DieselUserRepository::new(pool.clone())
        .create(&NewUser {
            username: name.to_owned(),
            email: format!("{name}@example.com"),
            password_hash: PasswordHash::new("$2b$04$unusedunusedunusedunuse"),
        })
        .await
        .expect("register user")
}

pub async fn ask(pool: &DbPool, author: UserId) -> Question {
    let question =
        NewQuestion::try_new("Borrowing", "Why does this not compile?", author).expect("question");
    DieselQuestionRepository::new(pool.clone())
        .create(&question)
        .await
        .expect("store question")
}

pub async fn answer(pool: &DbPool, question_id: QuestionId, author: UserId) -> Answer {
    let answer = NewAnswer::try_new(question_id, author, "Clone the value first.").expect("answer");
    DieselAnswerRepository::new(pool.clone())
        .create(&answer)
        .await
        .expect("store answer")
}

/// Current reputation as stored in the `users` table.
pub async fn reputation(pool: &DbPool, id: UserId) -> i64 {
    DieselUserRepository::new(pool.clone())
        .list()
        .await
        .expect("list users")
        .into_iter()
        .find(|user| user.id == id)
        .map(|user| user.reputation)
        .expect("user present")
}
