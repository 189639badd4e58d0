// Benchmark for range building and event bucketing
// Measures month-grid assembly over growing event lists

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use school_calendar::models::event::CalendarEvent;
use school_calendar::models::recurrence::{Recurrence, RecurrencePattern};
use school_calendar::models::view::ViewMode;
use school_calendar::services::bucket::{EventBuckets, HourSlots};
use school_calendar::services::range::DateRange;
use school_calendar::services::recurrence::expand_all;

fn term_events(count: usize) -> Vec<CalendarEvent> {
    let first = NaiveDate::from_ymd_opt(2025, 7, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    (0..count)
        .map(|i| {
            let start = first + Duration::hours((i as i64 * 5) % (31 * 24));
            let mut builder = CalendarEvent::builder()
                .id(format!("evt-{i}"))
                .title("Lesson")
                .start(start)
                .end(start + Duration::minutes(45));
            if i % 10 == 0 {
                builder = builder.recurrence(Recurrence::new(RecurrencePattern::Weekly));
            }
            builder.build().unwrap()
        })
        .collect()
}

fn bench_month_bucketing(c: &mut Criterion) {
    let mut group = c.benchmark_group("month_bucketing");
    let reference = NaiveDate::from_ymd_opt(2025, 7, 16).unwrap();

    for count in [10, 100, 1000].iter() {
        let events = term_events(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| {
                let range = DateRange::for_view(black_box(reference), ViewMode::Month);
                let expanded = expand_all(events, &range);
                EventBuckets::build(&expanded, &range, HourSlots::default())
            });
        });
    }

    group.finish();
}

fn bench_range_building(c: &mut Criterion) {
    let reference = NaiveDate::from_ymd_opt(2025, 7, 16).unwrap();
    c.bench_function("month_range", |b| {
        b.iter(|| DateRange::for_view(black_box(reference), ViewMode::Month))
    });
}

criterion_group!(benches, bench_month_bucketing, bench_range_building);
criterion_main!(benches);
