use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::Instant;

use crate::config::SchedulerConfig;
use crate::runtime::types::{BinaryOp, CompareOp, Expr, LabelEntry, ProcedureDef, Stmt};
use crate::runtime::{LabelId, ProcedureId, Program, Scheduler, Target, Val};

pub struct BenchmarkParams {
    pub threads: usize,
    pub ticks: u64,
    pub iterations: u32,
    pub warp: bool,
}

struct BenchmarkMetrics {
    elapsed_secs: f64,
    ticks: u64,
    steps: usize,
    iterations: f64,
    remaining_threads: usize,
}

pub fn run_benchmark(params: BenchmarkParams, config: SchedulerConfig) -> Result<()> {
    validate_params(&params)?;

    println!("🚀 Starting Cadence Benchmark");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("\n📋 Configuration:");
    println!("   Threads: {}", params.threads);
    println!("   Ticks: {}", params.ticks);
    println!("   Iterations/Call: {}", params.iterations);
    println!("   Warp: {}", params.warp);

    let program = Arc::new(counting_program(params.iterations, params.warp));
    let mut scheduler = Scheduler::new(config);
    for n in 0..params.threads {
        let target = scheduler.add_target(Target::new(format!("Sprite{}", n + 1)));
        scheduler.start_script(target, Arc::clone(&program))?;
    }

    let start = Instant::now();
    let mut steps = 0;
    for _ in 0..params.ticks {
        steps += scheduler.tick().stepped;
    }
    let elapsed_secs = start.elapsed().as_secs_f64();

    let iterations = scheduler
        .targets()
        .iter()
        .map(|t| crate::runtime::cast::to_number(&t.variable("total")))
        .sum();

    display_report(&BenchmarkMetrics {
        elapsed_secs,
        ticks: scheduler.ticks(),
        steps,
        iterations,
        remaining_threads: scheduler.active_threads(),
    });
    Ok(())
}

fn validate_params(params: &BenchmarkParams) -> Result<()> {
    if params.threads == 0 {
        return Err(anyhow!("--threads must be at least 1"));
    }
    if params.ticks == 0 {
        return Err(anyhow!("--ticks must be at least 1"));
    }
    Ok(())
}

/// Forever: call a procedure that counts to `iterations`, then yield
fn counting_program(iterations: u32, warp: bool) -> Program {
    let var = |name: &str| Expr::Var {
        name: name.to_string(),
    };

    let labels = vec![
        // L0: entry
        LabelEntry::Fragment {
            body: vec![Stmt::Jump { label: LabelId(1) }],
        },
        // L1: loop head
        LabelEntry::Fragment {
            body: vec![Stmt::Call {
                procedure: ProcedureId(0),
                args: vec![Expr::lit(iterations as f64)],
                resume: LabelId(2),
            }],
        },
        // L2: after the call, yield and go round again
        LabelEntry::Fragment {
            body: vec![Stmt::JumpLazy { label: LabelId(1) }],
        },
        // L3: procedure entry
        LabelEntry::Fragment {
            body: vec![
                Stmt::SetVariable {
                    name: "n".to_string(),
                    value: Expr::lit(0.0),
                },
                Stmt::Jump { label: LabelId(4) },
            ],
        },
        // L4: procedure loop
        LabelEntry::Fragment {
            body: vec![Stmt::If {
                test: Expr::Compare {
                    op: CompareOp::Lt,
                    left: Box::new(var("n")),
                    right: Box::new(Expr::Arg { index: 0 }),
                },
                then_s: vec![
                    Stmt::SetVariable {
                        name: "n".to_string(),
                        value: Expr::Binary {
                            op: BinaryOp::Add,
                            left: Box::new(var("n")),
                            right: Box::new(Expr::lit(1.0)),
                        },
                    },
                    Stmt::ChangeVariable {
                        name: "total".to_string(),
                        by: Expr::lit(Val::Num(1.0)),
                    },
                    Stmt::JumpLazy { label: LabelId(4) },
                ],
                else_s: vec![Stmt::End],
            }],
        },
    ];

    let procedures = vec![ProcedureDef {
        name: "count %n".to_string(),
        label: LabelId(3),
        warp,
    }];

    Program::new(LabelId(0), labels, procedures)
}

fn display_report(metrics: &BenchmarkMetrics) {
    let ticks_per_sec = metrics.ticks as f64 / metrics.elapsed_secs;
    let steps_per_sec = metrics.steps as f64 / metrics.elapsed_secs;

    println!("\n");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📊 Benchmark Results");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("⏱️  Duration: {:.3}s", metrics.elapsed_secs);
    println!();
    println!("📋 Work:");
    println!("   Ticks: {}", metrics.ticks);
    println!("   Steps: {}", metrics.steps);
    println!("   Loop iterations: {}", metrics.iterations);
    println!("   Threads still active: {}", metrics.remaining_threads);
    println!();
    println!("🚀 Throughput: {:.1} ticks/sec, {:.1} steps/sec", ticks_per_sec, steps_per_sec);
    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cast::to_number;

    fn run_ticks(warp: bool, ticks: usize) -> f64 {
        let mut scheduler = Scheduler::new(SchedulerConfig::default());
        let sprite = scheduler.add_target(Target::new("Sprite1"));
        scheduler
            .start_script(sprite, Arc::new(counting_program(5, warp)))
            .unwrap();
        for _ in 0..ticks {
            scheduler.tick();
        }
        to_number(&scheduler.targets()[0].variable("total"))
    }

    #[test]
    fn test_warped_counter_finishes_each_call_in_one_tick() {
        assert_eq!(run_ticks(true, 1), 5.0);
        assert_eq!(run_ticks(true, 3), 15.0);
    }

    #[test]
    fn test_plain_counter_yields_every_iteration() {
        assert_eq!(run_ticks(false, 3), 3.0);
    }

    #[test]
    fn test_validate_params() {
        let params = BenchmarkParams {
            threads: 0,
            ticks: 10,
            iterations: 1,
            warp: false,
        };
        assert!(validate_params(&params).is_err());
    }
}
