use std::borrow::Cow;
use std::cell::Cell;
use std::cmp::Ordering;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use locale_collate_core::CollateTablesBuilder;
use locale_collate_runtime::{
    Category, CollationContext, DirectoryProvider, LoadStatus, LocaleDataProvider,
    MemoryProvider, PartCache, RuntimeConfig, Weights,
};

struct CountingProvider {
    inner: MemoryProvider,
    fetches: Cell<usize>,
}

impl LocaleDataProvider for CountingProvider {
    fn locale_data(&self, category: Category, name: &str) -> Option<Cow<'_, [u8]>> {
        self.fetches.set(self.fetches.get() + 1);
        self.inner.locale_data(category, name)
    }
}

fn czech_tables() -> Vec<u8> {
    CollateTablesBuilder::new()
        .char_weights(b'c', Weights::new(30, 0))
        .char_weights(b'h', Weights::new(80, 0))
        .char_weights(b'i', Weights::new(90, 0))
        .chain(b"ch", Weights::new(85, 0))
        .chain(b"c", Weights::new(31, 0))
        .encode()
        .expect("encode")
}

fn counting() -> CountingProvider {
    CountingProvider {
        inner: MemoryProvider::new().with(Category::Collate, "cs_CZ.ISO8859-2", czech_tables()),
        fetches: Cell::new(0),
    }
}

fn temp_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    path.push(format!("locale_collate_{name}_{nanos}"));
    fs::create_dir_all(&path).expect("dir");
    path
}

#[test]
fn c_and_posix_never_fetch() {
    let provider = counting();
    let mut context = CollationContext::new();
    for name in ["C", "POSIX"] {
        let status = context.load_tables(&provider, name).expect("default");
        assert_eq!(status, LoadStatus::Cached);
        assert!(context.is_disabled());
    }
    assert_eq!(provider.fetches.get(), 0);
    assert!(context.tables().is_none());
}

#[test]
fn repeated_load_fetches_once() {
    let provider = counting();
    let mut context = CollationContext::new();
    assert_eq!(
        context
            .load_tables(&provider, "cs_CZ.ISO8859-2")
            .expect("first"),
        LoadStatus::Loaded
    );
    assert_eq!(
        context
            .load_tables(&provider, "cs_CZ.ISO8859-2")
            .expect("second"),
        LoadStatus::Cached
    );
    assert_eq!(provider.fetches.get(), 1);
}

#[test]
fn chain_lookup_prefers_earlier_entry() {
    let provider = counting();
    let mut context = CollationContext::new();
    context
        .load_tables(&provider, "cs_CZ.ISO8859-2")
        .expect("load");
    let step = context.lookup(b"char").expect("lookup");
    assert_eq!(step.len, 2);
    assert_eq!(step.weights, Weights::new(85, 0));
    let step = context.lookup(b"ice").expect("lookup");
    assert_eq!(step.len, 1);
    assert_eq!(step.weights, Weights::new(90, 0));
    // Czech "ch" sorts after "h"
    assert_eq!(context.compare(b"chata", b"hrad").expect("cmp"), Ordering::Greater);
}

#[test]
fn loads_from_locale_directory() {
    let root = temp_dir("directory");
    let locale_dir = root.join("cs_CZ.ISO8859-2");
    fs::create_dir_all(&locale_dir).expect("locale dir");
    fs::write(locale_dir.join("LC_COLLATE"), czech_tables()).expect("collate");
    fs::write(locale_dir.join("LC_MONETARY"), "CZK \nKč\n,\n \n3;3\n").expect("monetary");

    let config = RuntimeConfig {
        data_root: root.clone(),
        ..RuntimeConfig::default()
    };
    let provider = config.provider();
    let mut context = CollationContext::with_config(&config);
    assert_eq!(
        context
            .load_tables(&provider, "cs_CZ.ISO8859-2")
            .expect("load"),
        LoadStatus::Loaded
    );

    let mut monetary = PartCache::new(Category::Monetary, 3, 6);
    monetary
        .load_locale_part(&provider, "cs_CZ.ISO8859-2")
        .expect("monetary");
    let part = monetary.part().expect("part");
    assert_eq!(part.line_count(), 5);
    assert_eq!(part.field_str(1), Some("Kč"));
    assert_eq!(monetary.fields().len(), 6);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn unknown_version_leaves_tables_untouched() {
    let root = temp_dir("versions");
    for (name, bytes) in [
        ("good", czech_tables()),
        ("future", {
            let mut bytes = czech_tables();
            bytes[..4].copy_from_slice(b"2.0\n");
            bytes
        }),
        ("empty", {
            let mut bytes = czech_tables();
            bytes[10..14].copy_from_slice(&0u32.to_be_bytes());
            bytes
        }),
    ] {
        let dir = root.join(name);
        fs::create_dir_all(&dir).expect("dir");
        fs::write(dir.join("LC_COLLATE"), bytes).expect("write");
    }

    let provider = DirectoryProvider::new(&root);
    let mut context = CollationContext::new();
    context.load_tables(&provider, "good").expect("good");
    let before = context.tables().cloned();

    for name in ["future", "empty"] {
        let err = context.load_tables(&provider, name).expect_err("rejected");
        assert!(err.is_format());
    }
    assert_eq!(context.tables().cloned(), before);
    assert_eq!(context.encoding(), Some("good"));

    fs::remove_dir_all(&root).ok();
}
