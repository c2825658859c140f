use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion,
};
use serde_json::{json, Value};
use sitecore_layout::field_model;
use sitecore_layout::fields::{CheckboxField, DateField, ImageField, NumberField, TextField};
use sitecore_layout::FieldSet;

field_model! {
    #[allow(dead_code)]
    struct CardFields {
        title: TextField,
        price: NumberField,
        published: DateField,
        featured: CheckboxField,
        image: ImageField,
    }
}

fn card_fields(seed: usize) -> Value {
    let featured = if seed % 2 == 0 { "1" } else { "" };
    json!({
        "Title": {"value": format!("Card {seed}"), "editable": format!("<span>Card {seed}</span>")},
        "Price": {"value": format!("{}.{:02}", seed * 3, seed % 100)},
        "Published": {"value": "2024-05-01T10:15:30Z"},
        "Featured": {"value": featured},
        "Image": {"value": {"src": format!("/-/media/card-{seed}.jpg"), "alt": "Card", "width": 640}}
    })
}

fn make_features(depth: usize, width: usize, seed: usize) -> Value {
    let mut features = Vec::with_capacity(width + 2);
    features.push(json!({"name": "code", "type": "text/sitecore", "contents": "{}",
        "attributes": {"chrometype": "placeholder", "kind": "open", "id": format!("ph-{seed}")}}));
    for i in 0..width {
        let id = seed * 10 + i;
        let mut component = json!({
            "uid": format!("uid-{id}"),
            "componentName": format!("Card{}", i % 4),
            "dataSource": format!("{{{id:08X}}}"),
            "params": {"theme": "light", "columns": i % 3},
            "fields": card_fields(id)
        });
        if depth > 0 {
            component["placeholders"] = json!({ format!("slot-{depth}"): make_features(depth - 1, width, id) });
        }
        features.push(component);
    }
    features.push(json!({"name": "code", "type": "text/sitecore", "contents": "",
        "attributes": {"chrometype": "placeholder", "kind": "close", "id": format!("ph-{seed}")}}));
    Value::Array(features)
}

fn make_response(depth: usize, width: usize) -> String {
    json!({
        "sitecore": {
            "context": {"pageEditing": false, "site": {"name": "bench"}, "language": "en"},
            "route": {
                "name": "home",
                "itemId": "110d559f-dea5-42ea-9c1c-8a5df7e70ef9",
                "itemVersion": 1,
                "fields": card_fields(0),
                "placeholders": {"main": make_features(depth, width, 1)}
            }
        }
    })
    .to_string()
}

fn bench_parse(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, text: &str) {
    group.throughput(criterion::Throughput::Bytes(text.len() as u64));
    group.bench_function(BenchmarkId::new("layout", name), |b| {
        b.iter(|| {
            let response = sitecore_layout::from_str(black_box(text)).unwrap();
            black_box(response);
        });
    });

    group.bench_function(BenchmarkId::new("json_value", name), |b| {
        b.iter(|| {
            let value: Value = serde_json::from_str(black_box(text)).unwrap();
            black_box(value);
        });
    });
}

fn bench_reify(group: &mut BenchmarkGroup<'_, WallTime>, fields: &FieldSet) {
    group.bench_function("single_reads", |b| {
        b.iter(|| {
            let set = black_box(fields);
            black_box(set.try_read::<TextField>("title"));
            black_box(set.try_read::<NumberField>("price"));
            black_box(set.try_read::<DateField>("published"));
        });
    });

    group.bench_function("reify_all", |b| {
        b.iter(|| {
            let card: CardFields = black_box(fields).reify_all();
            black_box(card);
        });
    });
}

fn criterion_config() -> Criterion {
    if std::env::var("LAYOUT_BENCH_MINIMAL").is_ok() {
        Criterion::default()
            .warm_up_time(Duration::from_secs(0))
            .measurement_time(Duration::from_millis(10))
            .sample_size(10)
            .nresamples(1)
    } else {
        Criterion::default()
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let flat = make_response(0, 40);
    let nested = make_response(3, 4);

    let mut group = c.benchmark_group("parse");
    bench_parse(&mut group, "flat", &flat);
    bench_parse(&mut group, "nested", &nested);
    group.finish();

    let fields = FieldSet::from_json(card_fields(7));
    let mut group = c.benchmark_group("fields");
    bench_reify(&mut group, &fields);
    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = criterion_benchmark
}
criterion_main!(benches);
