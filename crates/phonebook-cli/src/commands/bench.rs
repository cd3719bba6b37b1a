use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use phonebook_config::{validate_bench, BenchConfig};
use phonebook_core::domain::ContactPayload;
use phonebook_store::{ContactService, ContactStore};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Instant;
use tracing::debug;

/// Requests issued per successful cycle: create, get, update, delete.
const REQUESTS_PER_CYCLE: u64 = 4;

#[derive(Debug, Args)]
pub struct BenchArgs {
    /// Number of worker threads
    #[arg(long)]
    pub threads: Option<usize>,
    /// Create/get/update/delete cycles per thread
    #[arg(long)]
    pub cycles: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    pub threads: usize,
    pub cycles: usize,
    pub expected_requests: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub elapsed_ms: u128,
    pub requests_per_second: f64,
}

pub fn bench(ctx: &Context<'_>, args: BenchArgs) -> Result<()> {
    let settings = validate_bench(BenchConfig {
        threads: args.threads.unwrap_or(ctx.config.bench.threads),
        cycles: args.cycles.unwrap_or(ctx.config.bench.cycles),
    })
    .with_context(|| "bench settings")?;

    let service = ctx.service(ctx.config.seed_sample_contacts);
    debug!(
        threads = settings.threads,
        cycles = settings.cycles,
        "starting benchmark"
    );
    let report = run(&service, settings);

    if ctx.json {
        print_json(&report)?;
    } else {
        println!("threads:        {}", report.threads);
        println!("cycles:         {}", report.cycles);
        println!("requests:       {}", report.expected_requests);
        println!("succeeded:      {}", report.succeeded);
        println!("failed:         {}", report.failed);
        println!("elapsed:        {:.3} sec", report.elapsed_ms as f64 / 1000.0);
        println!("requests/sec:   {:.0}", report.requests_per_second);
    }
    Ok(())
}

/// Runs `settings.threads` workers, each performing `settings.cycles` full
/// create/get/update/delete cycles on its own phone number.
pub fn run<S: ContactStore>(service: &ContactService<S>, settings: BenchConfig) -> BenchReport {
    let succeeded = AtomicU64::new(0);
    let failed = AtomicU64::new(0);
    let started = Instant::now();

    thread::scope(|scope| {
        for worker in 0..settings.threads {
            let succeeded = &succeeded;
            let failed = &failed;
            scope.spawn(move || {
                for cycle in 0..settings.cycles {
                    let (ok, err) = run_cycle(service, worker, cycle);
                    succeeded.fetch_add(ok, Ordering::Relaxed);
                    failed.fetch_add(err, Ordering::Relaxed);
                }
            });
        }
    });

    let elapsed = started.elapsed();
    let expected_requests = (settings.threads * settings.cycles) as u64 * REQUESTS_PER_CYCLE;
    let seconds = elapsed.as_secs_f64();
    let requests_per_second = if seconds > 0.0 {
        expected_requests as f64 / seconds
    } else {
        0.0
    };

    BenchReport {
        threads: settings.threads,
        cycles: settings.cycles,
        expected_requests,
        succeeded: succeeded.into_inner(),
        failed: failed.into_inner(),
        elapsed_ms: elapsed.as_millis(),
        requests_per_second,
    }
}

fn run_cycle<S: ContactStore>(
    service: &ContactService<S>,
    worker: usize,
    cycle: usize,
) -> (u64, u64) {
    // Worker index keeps numbers disjoint across threads; each cycle deletes
    // its contact before the next one reuses the number.
    let mut payload = ContactPayload::new(
        format!("BenchUser {worker}_{cycle}"),
        format!("+37529{:07}", worker),
        "Benchmark St",
    );

    let created = match service.create(&payload) {
        Ok(contact) => contact,
        Err(err) => {
            debug!(worker, cycle, error = %err, "benchmark create failed");
            return (0, 1);
        }
    };

    let mut ok = 1;
    let mut err = 0;
    let mut tally = |success: bool| {
        if success {
            ok += 1;
        } else {
            err += 1;
        }
    };

    tally(service.get_by_id(created.id).is_ok());
    payload.address = Some("Updated Addr".to_string());
    tally(service.update(created.id, &payload).is_ok());
    tally(service.delete(created.id).is_ok());
    (ok, err)
}

#[cfg(test)]
mod tests {
    use super::run;
    use phonebook_config::BenchConfig;
    use phonebook_store::{ContactService, MemoryStore};

    #[test]
    fn small_run_completes_without_failures() {
        let service = ContactService::new(MemoryStore::with_samples());
        let report = run(
            &service,
            BenchConfig {
                threads: 4,
                cycles: 25,
            },
        );
        assert_eq!(report.expected_requests, 4 * 25 * 4);
        assert_eq!(report.succeeded, report.expected_requests);
        assert_eq!(report.failed, 0);
        assert_eq!(service.get_all().len(), 3);
    }
}
