//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    auth,
    config::Config,
    db::{
        self, ClinicRepository, ExaminationRepository, IcdRepository, LabResultRepository,
        LabTestTypeRepository, PatientRepository, QueueRepository, ReportRepository,
        ScheduleRepository, StaffRepository,
    },
    services::{
        AdmissionService, ExaminationService, ReportService, ScheduleService, StaffService,
    },
};

/// Construction knobs, used by tests to skip touching the database.
#[derive(Debug, Clone, Copy)]
pub struct AppStateOptions {
    pub run_migrations: bool,
    pub seed: bool,
}

impl Default for AppStateOptions {
    fn default() -> Self {
        Self {
            run_migrations: true,
            seed: true,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,

    pub patients: PatientRepository,
    pub staff: StaffRepository,
    pub clinics: ClinicRepository,
    pub schedules: ScheduleRepository,
    pub queue: QueueRepository,
    pub icd: IcdRepository,
    pub lab_tests: LabTestTypeRepository,
    pub examinations: ExaminationRepository,
    pub lab_results: LabResultRepository,
    pub reports: ReportRepository,

    pub admission: AdmissionService,
    pub schedule_service: ScheduleService,
    pub staff_service: StaffService,
    pub examination_service: ExaminationService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_options(config, AppStateOptions::default()).await
    }

    pub async fn new_with_options(
        config: Config,
        options: AppStateOptions,
    ) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let db_pool = PgPoolOptions::new()
            .min_connections(config.database.pool_min_size)
            .max_connections(config.database.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.database.pool_timeout_seconds))
            .connect_lazy(&config.database.url)
            .context("Failed to build database pool")?;

        if options.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        if options.seed {
            if config.auth.default_staff_password.is_empty() {
                tracing::warn!(
                    "auth.default_staff_password is empty, skipping first-run seeding"
                );
            } else {
                let password_hash = auth::hash_password(&config.auth.default_staff_password);
                db::seed::seed(&db_pool, &password_hash)
                    .await
                    .context("Failed to seed database")?;
            }
        }

        let patients = PatientRepository::new(db_pool.clone());
        let staff = StaffRepository::new(db_pool.clone());
        let clinics = ClinicRepository::new(db_pool.clone());
        let schedules = ScheduleRepository::new(db_pool.clone());
        let queue = QueueRepository::new(db_pool.clone());
        let icd = IcdRepository::new(db_pool.clone());
        let lab_tests = LabTestTypeRepository::new(db_pool.clone());
        let examinations = ExaminationRepository::new(db_pool.clone());
        let lab_results = LabResultRepository::new(db_pool.clone());
        let reports = ReportRepository::new(db_pool.clone());

        let admission =
            AdmissionService::new(Arc::new(schedules.clone()), Arc::new(queue.clone()));
        let schedule_service = ScheduleService::new(schedules.clone());
        let staff_service = StaffService::new(staff.clone(), config.clone());
        let examination_service =
            ExaminationService::new(examinations.clone(), Arc::new(queue.clone()));
        let report_service = ReportService::new(reports.clone());

        Ok(Self {
            config,
            db_pool,
            patients,
            staff,
            clinics,
            schedules,
            queue,
            icd,
            lab_tests,
            examinations,
            lab_results,
            reports,
            admission,
            schedule_service,
            staff_service,
            examination_service,
            report_service,
        })
    }
}
