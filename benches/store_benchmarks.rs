//! Benchmarks for store reads and tag hierarchy building.
//!
//! Run with: cargo bench --bench store_benchmarks

use bear_notes::domain::{TagCount, TagPath, build_tag_tree};
use bear_notes::store::schema::create_fixture_schema;
use bear_notes::store::{BearStore, NoteStore, SearchQuery};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rusqlite::{Connection, params};

// =============================================================================
// Test Data Generation
// =============================================================================

/// Tags to spread across notes
const TAGS: &[&str] = &[
    "work",
    "work/meetings",
    "work/projects/alpha",
    "work/projects/beta",
    "home",
    "home/garden",
    "reading",
    "reading/books",
];

/// Sample words for generating note content
const WORDS: &[&str] = &[
    "meeting", "garden", "invoice", "roadmap", "recipe", "travel", "budget", "draft",
    "review", "sketch", "journal", "idea",
];

/// Core Data seconds for 2025-01-01T00:00:00Z.
const BASE: f64 = 757_382_400.0;

fn note_text(index: usize) -> String {
    let mut text = format!("# Note {index}\n");
    for i in 0..40 {
        text.push_str(WORDS[(index * 7 + i) % WORDS.len()]);
        text.push(' ');
    }
    text
}

/// Builds an in-memory store with `count` notes, some tagged, some with
/// attachments.
fn setup_store(count: usize) -> BearStore {
    let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
    create_fixture_schema(&conn).expect("Failed to create schema");

    for (i, tag) in TAGS.iter().enumerate() {
        conn.execute(
            "INSERT INTO ZSFNOTETAG (Z_PK, ZTITLE) VALUES (?1, ?2)",
            params![i as i64 + 1, tag],
        )
        .expect("Failed to insert tag");
    }

    for i in 0..count {
        let pk = i as i64 + 1;
        conn.execute(
            "INSERT INTO ZSFNOTE (Z_PK, ZUNIQUEIDENTIFIER, ZTITLE, ZTEXT, ZCREATIONDATE,
                                  ZMODIFICATIONDATE, ZPINNED)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?6)",
            params![
                pk,
                format!("NOTE-{i:06}"),
                format!("Note {i}"),
                note_text(i),
                BASE + (i as f64) * 60.0,
                i % 10 == 0,
            ],
        )
        .expect("Failed to insert note");

        if i % 3 != 0 {
            let tag_pk = (i % TAGS.len()) as i64 + 1;
            conn.execute(
                "INSERT INTO Z_5TAGS (Z_5NOTES, Z_13TAGS) VALUES (?1, ?2)",
                params![pk, tag_pk],
            )
            .expect("Failed to link tag");
        }
        if i % 5 == 0 {
            conn.execute(
                "INSERT INTO ZSFNOTEFILE (ZNOTE, ZFILENAME, ZSEARCHTEXT) VALUES (?1, ?2, ?3)",
                params![pk, format!("scan-{i}.pdf"), "Total amount due"],
            )
            .expect("Failed to insert attachment");
        }
    }

    BearStore::from_connection(conn).expect("Failed to prepare store")
}

fn term_query(term: &str) -> SearchQuery {
    SearchQuery {
        term: Some(term.to_string()),
        limit: Some(50),
        ..SearchQuery::default()
    }
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_search_term(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_term");

    for size in [100, 1_000, 5_000] {
        let store = setup_store(size);
        let query = term_query("roadmap");
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &size, |b, _| {
            b.iter(|| store.search(&query).expect("search failed"));
        });
    }
    group.finish();
}

fn bench_search_filters(c: &mut Criterion) {
    let store = setup_store(1_000);
    let mut group = c.benchmark_group("search_filters");

    group.bench_function("tag_with_descendants", |b| {
        let query = SearchQuery {
            tag: Some("work".to_string()),
            ..SearchQuery::default()
        };
        b.iter(|| store.search(&query).expect("search failed"));
    });

    group.bench_function("attachment_text", |b| {
        let query = term_query("amount due");
        b.iter(|| store.search(&query).expect("search failed"));
    });

    group.bench_function("pinned", |b| {
        let query = SearchQuery {
            pinned_only: true,
            ..SearchQuery::default()
        };
        b.iter(|| store.search(&query).expect("search failed"));
    });

    group.finish();
}

fn bench_get_note(c: &mut Criterion) {
    let store = setup_store(1_000);

    c.bench_function("get_note", |b| {
        b.iter(|| store.get_note("NOTE-000500").expect("lookup failed"));
    });
}

fn bench_list_tags(c: &mut Criterion) {
    let store = setup_store(1_000);

    c.bench_function("list_tags", |b| {
        b.iter(|| store.list_tags().expect("list_tags failed"));
    });
}

fn bench_build_tag_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tag_tree");

    for width in [10, 100, 500] {
        let flat: Vec<TagCount> = (0..width)
            .flat_map(|i| {
                [
                    format!("area{i}"),
                    format!("area{i}/topic"),
                    format!("area{i}/topic/detail"),
                ]
            })
            .filter_map(|raw| TagPath::new(&raw))
            .map(|path| TagCount::new(path, 3))
            .collect();

        group.throughput(Throughput::Elements(flat.len() as u64));
        group.bench_with_input(BenchmarkId::new("tags", flat.len()), &flat, |b, flat| {
            b.iter(|| build_tag_tree(flat.iter().cloned()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_search_term,
    bench_search_filters,
    bench_get_note,
    bench_list_tags,
    bench_build_tag_tree,
);
criterion_main!(benches);
