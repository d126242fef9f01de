use std::num::NonZeroUsize;

use bytes::Bytes;
use remora_cache::CacheOptions;
use remora_file::FsSource;
use remora_stream::{Adapter, AdapterOptions, RangeSource, ReadOutcome};

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &[u8]) {
    std::fs::write(dir.path().join(name), contents).unwrap();
}

#[tokio::test]
async fn full_read_reports_the_size_hint() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir, "demo.txt", b"hello world");

    let source = FsSource::rooted(dir.path());
    let stream = source.stream_at("demo.txt", 0, 64).await.unwrap();

    assert_eq!(stream.size(), Some(11));
    assert_eq!(
        stream.collect().await.unwrap(),
        Bytes::from_static(b"hello world")
    );
}

#[tokio::test]
async fn offset_reads_carry_no_size_hint() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir, "demo.txt", b"hello world");

    let source = FsSource::rooted(dir.path());
    let stream = source.stream_at("demo.txt", 6, 5).await.unwrap();

    assert_eq!(stream.size(), None);
    assert_eq!(stream.collect().await.unwrap(), Bytes::from_static(b"world"));
}

#[tokio::test]
async fn len_zero_reads_to_the_end_of_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir, "demo.txt", b"hello world");

    let source = FsSource::rooted(dir.path());
    let stream = source.stream_at("demo.txt", 6, 0).await.unwrap();

    assert_eq!(stream.collect().await.unwrap(), Bytes::from_static(b"world"));
}

#[tokio::test]
async fn range_is_clipped_to_the_file_size() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir, "demo.txt", b"hello world");

    let source = FsSource::rooted(dir.path());
    let stream = source.stream_at("demo.txt", 8, 100).await.unwrap();

    assert_eq!(stream.collect().await.unwrap(), Bytes::from_static(b"rld"));
}

#[tokio::test]
async fn offset_at_or_past_end_is_end_of_stream() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir, "demo.txt", b"hello world");

    let source = FsSource::rooted(dir.path());
    for offset in [11, 4096] {
        let err = source.stream_at("demo.txt", offset, 8).await.unwrap_err();
        assert!(err.is_eof(), "offset {offset}");
    }
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = FsSource::rooted(dir.path());

    let err = source.stream_at("missing.txt", 0, 8).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn empty_file_is_end_of_stream_at_offset_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir, "empty.bin", b"");

    let source = FsSource::rooted(dir.path());
    let err = source.stream_at("empty.bin", 0, 8).await.unwrap_err();
    assert!(err.is_eof());
}

#[tokio::test]
async fn cursor_reads_a_file_through_a_cached_adapter() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir, "demo.txt", b"hello world");

    let adapter = Adapter::with_options(
        FsSource::rooted(dir.path()),
        AdapterOptions::default().with_cache(CacheOptions::new(NonZeroUsize::new(4).unwrap())),
    );

    let mut reader = adapter.reader("demo.txt");
    let outcome = reader.read().await.unwrap();
    assert_eq!(outcome, ReadOutcome::Data(Bytes::from_static(b"hello world")));
    assert_eq!(reader.len(), Some(11));
    assert!(reader.read().await.unwrap().is_eof());

    // A rewound re-read is served from cache even after the file is gone.
    std::fs::remove_file(dir.path().join("demo.txt")).unwrap();
    let mut rewound = adapter.reader("demo.txt");
    assert_eq!(
        rewound.read().await.unwrap(),
        ReadOutcome::Data(Bytes::from_static(b"hello world"))
    );
}
