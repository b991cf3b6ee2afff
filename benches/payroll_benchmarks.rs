//! Performance benchmarks for the timesheet and payroll engine.
//!
//! This benchmark suite verifies that the engine meets performance targets:
//! - Wage computation for one fortnight: < 100μs mean
//! - Wage computation for 100 workers: < 10ms mean
//! - Project aggregation over 1000 site timesheets: < 50ms mean
//! - Wage calculation API round trip: < 1ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use sitepay_engine::aggregation::summarize_projects;
use sitepay_engine::api::{AppState, create_router};
use sitepay_engine::calculation::calculate_worker_pay;
use sitepay_engine::config::ConfigLoader;
use sitepay_engine::models::{
    AccountStatus, EmploymentType, EquipmentLine, MaterialLine, Project, ProjectStatus,
    ShiftPeriod, SiteTimesheet, SiteTimesheetDraft, Worker, WorkerTimesheet,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn bench_worker() -> Worker {
    Worker {
        id: Uuid::new_v4(),
        full_name: "Bench Worker".to_string(),
        employee_no: None,
        position: None,
        employment_type: EmploymentType::FullTime,
        hourly_rate: dec("25.00"),
        is_resident: true,
        super_enabled: true,
        account_status: AccountStatus::Active,
    }
}

/// Creates `count` 9-hour clock entries for one worker.
fn clock_entries(worker_id: Uuid, count: u32) -> Vec<WorkerTimesheet> {
    (0..count)
        .map(|i| {
            WorkerTimesheet::clock_entry(
                worker_id,
                None,
                NaiveDate::from_ymd_opt(2026, 1, 1 + (i % 28)).unwrap(),
                NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
                None,
                None,
            )
            .unwrap()
        })
        .collect()
}

/// Benchmark: wage computation for one worker's fortnight.
///
/// Target: < 100μs mean
fn bench_single_wage(c: &mut Criterion) {
    let config = ConfigLoader::load("./config/png").expect("Failed to load config");
    let worker = bench_worker();
    let sheets = clock_entries(worker.id, 10);

    c.bench_function("wage_single_fortnight", |b| {
        b.iter(|| {
            let pay = calculate_worker_pay(
                black_box(&worker),
                black_box(&sheets),
                Decimal::ZERO,
                Decimal::ZERO,
                config.config(),
            )
            .unwrap();
            black_box(pay)
        })
    });
}

/// Benchmark: wage computation across a crew of varying size.
fn bench_crew_wages(c: &mut Criterion) {
    let config = ConfigLoader::load("./config/png").expect("Failed to load config");
    let mut group = c.benchmark_group("wage_crew");

    for crew_size in [10u64, 100] {
        let crew: Vec<(Worker, Vec<WorkerTimesheet>)> = (0..crew_size)
            .map(|_| {
                let worker = bench_worker();
                let sheets = clock_entries(worker.id, 10);
                (worker, sheets)
            })
            .collect();

        group.throughput(Throughput::Elements(crew_size));
        group.bench_with_input(
            BenchmarkId::from_parameter(crew_size),
            &crew,
            |b, crew| {
                b.iter(|| {
                    for (worker, sheets) in crew {
                        let pay = calculate_worker_pay(
                            worker,
                            sheets,
                            Decimal::ZERO,
                            Decimal::ZERO,
                            config.config(),
                        )
                        .unwrap();
                        black_box(pay);
                    }
                })
            },
        );
    }
    group.finish();
}

/// Benchmark: project aggregation over authorized site timesheets.
///
/// Target: < 50ms mean for 1000 records
fn bench_aggregation(c: &mut Criterion) {
    let foreman = bench_worker();
    let projects: Vec<Project> = (0..10)
        .map(|i| Project {
            id: Uuid::new_v4(),
            name: format!("Project {}", i),
            location: None,
            status: ProjectStatus::Active,
            created_at: Utc::now(),
        })
        .collect();

    let timesheets: Vec<SiteTimesheet> = (0..1000u32)
        .map(|i| {
            let sheet = SiteTimesheet::record(SiteTimesheetDraft {
                project_id: projects[(i % 10) as usize].id,
                foreman_id: foreman.id,
                date: NaiveDate::from_ymd_opt(2026, 1, 1 + (i % 28)).unwrap(),
                shift: ShiftPeriod::Morning,
                number_of_workers: 12,
                equipment: vec![EquipmentLine {
                    name: "Excavator".to_string(),
                    hours_used: dec("6.5"),
                }],
                materials: vec![MaterialLine {
                    item: "Cement".to_string(),
                    quantity: dec("10"),
                    unit: "bags".to_string(),
                    material_type: Some("cement_bag".to_string()),
                    calculated_kg: None,
                    notes: None,
                }],
                production: vec![],
                remarks: Some(format!("Record {}", i)),
            })
            .unwrap()
            .submit()
            .unwrap();
            sheet.authorize(Uuid::new_v4(), Utc::now()).unwrap()
        })
        .collect();

    let workers = vec![foreman];

    c.bench_function("aggregate_1000_sheets", |b| {
        b.iter(|| {
            let summaries = summarize_projects(
                black_box(&projects),
                black_box(&timesheets),
                black_box(&workers),
            );
            black_box(summaries)
        })
    });
}

/// Benchmark: wage calculation API round trip.
///
/// Target: < 1ms mean
fn bench_wage_api(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/png").expect("Failed to load config");
    let router = create_router(AppState::new(config));

    let entries: Vec<serde_json::Value> = (12..22)
        .map(|d| {
            serde_json::json!({
                "date": format!("2026-01-{:02}", d),
                "clock_in": "07:00:00",
                "clock_out": "16:00:00"
            })
        })
        .collect();
    let body = serde_json::json!({
        "worker": {
            "full_name": "Bench Worker",
            "employment_type": "full_time",
            "hourly_rate": "25.00",
            "is_resident": true,
            "super_enabled": true
        },
        "entries": entries
    })
    .to_string();

    c.bench_function("wage_api_round_trip", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/wages/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_wage,
    bench_crew_wages,
    bench_aggregation,
    bench_wage_api
);
criterion_main!(benches);
