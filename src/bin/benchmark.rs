use std::time::{Duration, Instant};

use anyhow::Result;
use wavy_sandbox::filters::{list_filters, FilterOptions, WIDTH};
use wavy_sandbox::palette::Palette;
use wavy_sandbox::raster::{build_raster, IndexField};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LerpMode {
    Off,
    On,
    Both,
}

struct Args {
    frames: usize,
    number: i64,
    lerp: LerpMode,
    seed: u64,
    ci_smoke: bool,
    max_ms: f64,
}

fn parse_args() -> Args {
    let mut args = Args {
        frames: 24,
        number: 16,
        lerp: LerpMode::Both,
        seed: 0x5EED_F11E,
        ci_smoke: false,
        max_ms: 80.0,
    };

    let argv = std::env::args().skip(1).collect::<Vec<_>>();
    let mut i = 0usize;
    while i < argv.len() {
        let k = argv[i].as_str();
        let v = argv.get(i + 1).map(|s| s.as_str());
        match (k, v) {
            ("--frames", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.frames = n.max(1);
                }
                i += 2;
            }
            ("--number", Some(x)) => {
                if let Ok(n) = x.parse::<i64>() {
                    args.number = n;
                }
                i += 2;
            }
            ("--lerp", Some("off")) => {
                args.lerp = LerpMode::Off;
                i += 2;
            }
            ("--lerp", Some("on")) => {
                args.lerp = LerpMode::On;
                i += 2;
            }
            ("--lerp", Some("both")) => {
                args.lerp = LerpMode::Both;
                i += 2;
            }
            ("--seed", Some(x)) => {
                if let Ok(n) = x.parse::<u64>() {
                    args.seed = n;
                }
                i += 2;
            }
            ("--max-ms", Some(x)) => {
                if let Ok(n) = x.parse::<f64>() {
                    args.max_ms = n.max(0.1);
                }
                i += 2;
            }
            ("--ci-smoke", _) => {
                args.ci_smoke = true;
                i += 1;
            }
            _ => {
                log::warn!("ignoring unknown argument '{k}'");
                i += 1;
            }
        }
    }

    args
}

fn bench(args: &Args, lerp: bool) -> Result<Vec<String>> {
    let opts = FilterOptions::default().with_number(args.number);
    let mut rng = fastrand::Rng::with_seed(args.seed);
    let mut failures = Vec::new();
    let mut total_time = Duration::ZERO;

    println!(
        "filter benchmark: filters={} frames/filter={} size={}x{} number={} lerp={}",
        list_filters().len(),
        args.frames,
        WIDTH,
        WIDTH,
        args.number,
        lerp
    );

    for (idx, filter) in list_filters().iter().enumerate() {
        let field = IndexField::compute(filter, &opts);
        let bad = field
            .values()
            .iter()
            .filter(|v| !v.is_finite() || **v < 0.0)
            .count();
        if bad > 0 {
            failures.push(format!("{}: {} non-finite or negative buckets", filter.name(), bad));
        }

        let mut palette = Palette::new();
        let start = Instant::now();
        for _ in 0..args.frames {
            let (_, next) = build_raster(filter, &opts, palette, lerp, &mut rng);
            palette = next;
        }
        let elapsed = start.elapsed();
        total_time += elapsed;
        let ms = elapsed.as_secs_f64() * 1000.0 / args.frames as f64;
        println!(
            "{:>2}. {:<18} {:>8.3} ms/frame  buckets={:>4}",
            idx,
            filter.name(),
            ms,
            palette.len()
        );
        if args.ci_smoke && ms > args.max_ms {
            failures.push(format!("{}: {:.3} ms/frame > {:.3}", filter.name(), ms, args.max_ms));
        }
    }

    let frames = args.frames * list_filters().len();
    let avg_ms = total_time.as_secs_f64() * 1000.0 / frames.max(1) as f64;
    let fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };
    println!("summary: {:>8.3} ms/frame avg  {:>7.2} FPS", avg_ms, fps);
    Ok(failures)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = parse_args();

    let mut failures = Vec::new();
    match args.lerp {
        LerpMode::Off => failures.extend(bench(&args, false)?),
        LerpMode::On => failures.extend(bench(&args, true)?),
        LerpMode::Both => {
            failures.extend(bench(&args, false)?);
            failures.extend(bench(&args, true)?);
        }
    }

    if args.ci_smoke {
        if !failures.is_empty() {
            log::error!("CI smoke: FAIL");
            for f in &failures {
                log::error!("  {f}");
            }
            anyhow::bail!("ci smoke failed ({} problems)", failures.len());
        }
        println!("CI smoke: PASS (max_ms={:.3})", args.max_ms);
    }

    Ok(())
}
