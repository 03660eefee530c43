use mediadir_config::ConfigurationNode;
use mediadir_config::RootCategory;
use mediadir_index::CleanReport;
use mediadir_index::IndexElement;
use mediadir_index::MediaIndex;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn local(parent: &str, path: &std::path::Path) -> IndexElement {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    IndexElement::discovered(
        parent,
        RootCategory::Video,
        path.to_string_lossy(),
        name,
        true,
    )
}

#[test]
fn clean_removes_missing_paths_and_their_subtrees() {
    let dir = tempdir().unwrap();
    let kept = dir.path().join("kept.mp4");
    let season = dir.path().join("season");
    let episode = season.join("e01.mkv");
    fs::write(&kept, b"").unwrap();
    fs::create_dir(&season).unwrap();
    fs::write(&episode, b"").unwrap();

    let index = MediaIndex::new();
    let folder = ConfigurationNode::new("v1", "Movies", dir.path().to_string_lossy());
    index.put("v1", IndexElement::from_configuration(RootCategory::Video, &folder));
    let kept_id = index.add(local("v1", &kept));
    let season_id = index.add(local("v1", &season));
    let episode_id = index.add(local(&season_id, &episode));
    // A remote entry below the season survives only as long as its parent.
    let stream_id = index.add(IndexElement::discovered(
        &episode_id,
        RootCategory::Video,
        "https://example.org/e01.srt",
        "e01.srt",
        false,
    ));

    assert_eq!(index.clean(), CleanReport::default());
    assert_eq!(index.len(), 5);

    fs::remove_dir_all(&season).unwrap();
    let report = index.clean();
    assert_eq!(report.removed(), 3);
    assert_eq!(report.missing, 2);
    assert_eq!(report.orphaned, 1);
    assert!(index.contains("v1"));
    assert!(index.contains(&kept_id));
    for id in [&season_id, &episode_id, &stream_id] {
        assert!(!index.contains(id), "{id} should be gone");
    }
}

#[test]
fn clean_removes_a_whole_orphan_chain_in_one_pass() {
    let index = MediaIndex::new();
    let mut parent = "deleted-folder".to_string();
    for depth in 0..5 {
        parent = index.add(IndexElement::discovered(
            &parent,
            RootCategory::Audio,
            format!("https://example.org/{depth}"),
            format!("level {depth}"),
            false,
        ));
    }
    assert_eq!(index.len(), 5);

    let report = index.clean();
    assert_eq!(report.orphaned, 5);
    assert!(index.is_empty());
}

#[test]
fn clean_never_removes_locked_entries() {
    let index = MediaIndex::new();
    let folder = ConfigurationNode::new("v1", "Movies", "/does/not/exist/anywhere");
    index.put("v1", IndexElement::from_configuration(RootCategory::Video, &folder));
    let podcast = ConfigurationNode::new("p1", "News", "https://example.org/feed.xml");
    index.put("p1", IndexElement::from_configuration(RootCategory::Podcast, &podcast));
    let episode = index.add(IndexElement::discovered(
        "p1",
        RootCategory::Podcast,
        "https://example.org/ep1.mp3",
        "Episode 1",
        false,
    ));

    assert_eq!(index.clean().removed(), 0);
    assert!(index.contains("v1"));
    assert!(index.contains("p1"));
    assert!(index.contains(&episode));
}

#[test]
fn entries_below_well_known_ids_are_reachable() {
    let index = MediaIndex::new();
    let id = index.add(IndexElement::discovered(
        "1_VIDEOS",
        RootCategory::Video,
        "https://example.org/live",
        "Live",
        false,
    ));
    assert_eq!(index.clean().removed(), 0);
    assert!(index.contains(&id));
}
