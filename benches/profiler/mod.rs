// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion tuned through `BENCH_*` env vars, with a flamegraph profiler attached.
///
/// Flamegraphs are only written under `--profile-time`.
pub fn criterion() -> Criterion {
    let frequency = env_parse("PROFILE_FREQ", 100_i32).clamp(1, 1000);
    let sample_size = env_parse("BENCH_SAMPLE_SIZE", 50_usize).clamp(10, 200);
    let warmup = Duration::from_secs(env_parse("BENCH_WARMUP_SECS", 2_u64).clamp(1, 60));
    let measurement = Duration::from_secs(env_parse("BENCH_MEASUREMENT_SECS", 4_u64).clamp(1, 120));

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(warmup)
        .measurement_time(measurement)
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
