use mediadir_browse::BrowseRequest;
use mediadir_browse::ContentDirectory;
use mediadir_browse::LocalFolderResolver;
use mediadir_browse::SharedConfig;
use mediadir_config::MediaConfig;
use mediadir_config::RootCategory;
use mediadir_index::ConfigurationBridge;
use mediadir_index::MediaIndex;
use parking_lot::RwLock;
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

/// Ids of the `<item>` elements of a DIDL-Lite document, in order.
fn item_ids(document: &str) -> Vec<String> {
    document
        .split("<item id=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

#[test]
fn folder_edits_reissue_ids_of_discovered_files() {
    let media = tempdir().unwrap();
    let video = media.path().join("video");
    fs::create_dir(&video).unwrap();
    fs::write(video.join("movie.mp4"), b"frames").unwrap();

    let config: SharedConfig = Arc::new(RwLock::new(MediaConfig::default()));
    let index = MediaIndex::new();
    let bridge = ConfigurationBridge::new(index.clone());
    let directory = ContentDirectory::new(
        index.clone(),
        LocalFolderResolver::new(config.clone()),
        "http://127.0.0.1:8085",
    );

    // ADD creates a locked entry at the configuration id.
    let added = config
        .write()
        .add_folder(RootCategory::Video, "Movies", &video.to_string_lossy())
        .unwrap();
    let folder_id = added.node.id.clone();
    bridge.apply(&added);
    let folder = index.get(&folder_id).unwrap();
    assert!(folder.locked);
    assert_eq!(folder.parent_id, "1_VIDEOS");

    let categories = directory
        .browse(&BrowseRequest::children("1_VIDEOS", 0, 0))
        .unwrap();
    assert_eq!(categories.number_returned, 1);
    assert!(categories.result.contains(&format!("id=\"{folder_id}\"")));
    assert!(categories.result.contains("<dc:title>Movies</dc:title>"));

    // Browsing the folder issues an id for movie.mp4 and reuses it next time.
    let first = directory
        .browse(&BrowseRequest::children(&folder_id, 0, 0))
        .unwrap();
    assert_eq!(first.number_returned, 1);
    assert_eq!(first.total_matches, 1);
    let ids = item_ids(&first.result);
    assert_eq!(ids.len(), 1);
    let movie_id = ids[0].clone();
    assert!(first.result.contains("object.item.videoItem.movie"));
    assert!(first.result.contains(r#"size="6""#));

    let second = directory
        .browse(&BrowseRequest::children(&folder_id, 0, 0))
        .unwrap();
    assert_eq!(item_ids(&second.result), vec![movie_id.clone()]);
    assert_eq!(
        directory.backing_location(&movie_id).unwrap(),
        video.join("movie.mp4").to_string_lossy()
    );

    // UPDATE of a video folder drops everything discovered below it.
    let updated = config
        .write()
        .update_folder(RootCategory::Video, &folder_id, "Films", &video.to_string_lossy())
        .unwrap();
    bridge.apply(&updated);
    assert!(index.get(&movie_id).is_none());
    assert_eq!(index.get(&folder_id).map(|e| e.name), Some("Films".to_string()));

    let third = directory
        .browse(&BrowseRequest::children(&folder_id, 0, 0))
        .unwrap();
    let ids = item_ids(&third.result);
    assert_eq!(ids.len(), 1);
    assert_ne!(ids[0], movie_id);
}

#[test]
fn sweep_forgets_deleted_files() {
    let media = tempdir().unwrap();
    fs::write(media.path().join("a.jpg"), b"").unwrap();
    fs::write(media.path().join("b.png"), b"").unwrap();

    let config: SharedConfig = Arc::new(RwLock::new(MediaConfig::default()));
    let index = MediaIndex::new();
    let bridge = ConfigurationBridge::new(index.clone());
    let directory = ContentDirectory::new(
        index.clone(),
        LocalFolderResolver::new(config.clone()),
        "http://127.0.0.1:8085",
    );
    let added = config
        .write()
        .add_folder(RootCategory::Picture, "Photos", &media.path().to_string_lossy())
        .unwrap();
    bridge.apply(&added);

    let listing = directory
        .browse(&BrowseRequest::children(&added.node.id, 0, 0))
        .unwrap();
    assert!(listing.result.contains("object.item.imageItem.photo"));
    assert_eq!(index.len(), 3);

    fs::remove_file(media.path().join("a.jpg")).unwrap();
    let report = index.clean();
    assert_eq!(report.missing, 1);
    assert_eq!(index.len(), 2);

    let listing = directory
        .browse(&BrowseRequest::children(&added.node.id, 0, 0))
        .unwrap();
    assert_eq!(listing.total_matches, 1);
}

#[test]
fn root_metadata_and_children() {
    let config: SharedConfig = Arc::new(RwLock::new(MediaConfig::default()));
    let directory = ContentDirectory::new(
        MediaIndex::new(),
        LocalFolderResolver::new(config),
        "http://127.0.0.1:8085",
    );

    let root = directory.browse(&BrowseRequest::metadata("0")).unwrap();
    assert_eq!(root.number_returned, 1);
    assert!(root.result.contains(r#"id="0" parentID="-1""#));
    assert!(root.result.contains(r#"childCount="4""#));

    let children = directory
        .browse(&BrowseRequest::children("0", 1, 2))
        .unwrap();
    assert_eq!(children.number_returned, 2);
    assert_eq!(children.total_matches, 4);
    assert!(children.result.contains("2_PICTURES"));
    assert!(children.result.contains("3_AUDIOS"));
    assert!(!children.result.contains("1_VIDEOS\""));
    // Category containers are never stored in the index.
    assert!(directory.index().is_empty());
}

#[cfg(unix)]
#[test]
fn sweep_keeps_ids_next_to_non_utf8_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let media = tempdir().unwrap();
    fs::write(media.path().join(OsStr::from_bytes(b"caf\xe9.mp4")), b"").unwrap();
    fs::write(media.path().join("cafe.mp4"), b"").unwrap();

    let config: SharedConfig = Arc::new(RwLock::new(MediaConfig::default()));
    let index = MediaIndex::new();
    let bridge = ConfigurationBridge::new(index.clone());
    let directory = ContentDirectory::new(
        index.clone(),
        LocalFolderResolver::new(config.clone()),
        "http://127.0.0.1:8085",
    );
    let added = config
        .write()
        .add_folder(RootCategory::Video, "Movies", &media.path().to_string_lossy())
        .unwrap();
    bridge.apply(&added);

    let before = directory
        .browse(&BrowseRequest::children(&added.node.id, 0, 0))
        .unwrap();
    assert_eq!(before.total_matches, 1);
    assert_eq!(index.clean().removed(), 0);

    let after = directory
        .browse(&BrowseRequest::children(&added.node.id, 0, 0))
        .unwrap();
    assert_eq!(item_ids(&after.result), item_ids(&before.result));
}
