//! Benchmarks for conversation memory windowing and prompt rendering.
//!
//! Every operation reads a window of recent turns, and clarification or
//! explanation requests render that window into prompt text. These benches
//! track both on long conversations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tabletalk_chat::ConversationMemory;

/// Build a memory holding `turns` alternating user/assistant turns.
fn filled_memory(turns: usize) -> ConversationMemory {
    let mut memory = ConversationMemory::new();
    for i in 0..turns {
        if i % 2 == 0 {
            memory.add_user(format!(
                "Which product category had the highest revenue in quarter {}?",
                i
            ));
        } else {
            memory.add_assistant(format!("Electronics, with {} in revenue.", i * 1_000));
        }
    }
    memory
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_window");
    for &len in &[10usize, 1_000, 100_000] {
        let memory = filled_memory(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &memory, |b, memory| {
            b.iter(|| black_box(memory.window(black_box(8)).len()))
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let memory = filled_memory(1_000);
    let mut group = c.benchmark_group("memory_render");
    for &n in &[1usize, 8, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(memory.render(black_box(n))))
        });
    }
    group.finish();
}

fn bench_append_capped(c: &mut Criterion) {
    c.bench_function("memory_append_capped_64", |b| {
        let mut memory = ConversationMemory::with_max_turns(64);
        let mut i = 0usize;
        b.iter(|| {
            memory.add_user(format!("turn {}", i));
            i += 1;
        })
    });
}

criterion_group!(benches, bench_window, bench_render, bench_append_capped);
criterion_main!(benches);
