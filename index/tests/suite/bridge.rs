use mediadir_config::ConfigurationEvent;
use mediadir_config::ConfigurationNode;
use mediadir_config::MediaConfig;
use mediadir_config::RootCategory;
use mediadir_index::ConfigurationBridge;
use mediadir_index::IndexElement;
use mediadir_index::MediaIndex;
use pretty_assertions::assert_eq;

fn child(parent: &str, category: RootCategory, name: &str) -> IndexElement {
    IndexElement::discovered(parent, category, format!("/media/{name}"), name, true)
}

#[test]
fn update_drops_the_old_subtree_of_a_folder() {
    let bridge = ConfigurationBridge::new(MediaIndex::new());
    let index = bridge.index().clone();
    let movies = ConfigurationNode::new("v1", "Movies", "/media/video");
    bridge.apply(&ConfigurationEvent::add(RootCategory::Video, movies));
    let movie = index.add(child("v1", RootCategory::Video, "movie.mp4"));
    let nested = index.add(child(&movie, RootCategory::Video, "movie.srt"));

    let moved = ConfigurationNode::new("v1", "Movies", "/srv/video");
    let update = ConfigurationEvent::update(RootCategory::Video, moved);
    bridge.apply(&update);
    bridge.apply(&update);

    assert_eq!(index.len(), 1);
    assert_eq!(index.get("v1").map(|e| e.path), Some("/srv/video".to_string()));
    assert!(!index.contains(&movie));
    assert!(!index.contains(&nested));
    assert_ne!(index.add(child("v1", RootCategory::Video, "movie.mp4")), movie);
}

#[test]
fn podcast_edits_leave_children_for_the_sweep() {
    let bridge = ConfigurationBridge::new(MediaIndex::new());
    let index = bridge.index().clone();
    let feed = ConfigurationNode::new("p1", "News", "https://example.org/feed.xml");
    bridge.apply(&ConfigurationEvent::add(RootCategory::Podcast, feed.clone()));
    let episode = index.add(IndexElement::discovered(
        "p1",
        RootCategory::Podcast,
        "https://example.org/ep1.mp3",
        "Episode 1",
        false,
    ));

    bridge.apply(&ConfigurationEvent::update(RootCategory::Podcast, feed.clone()));
    assert!(index.contains(&episode));

    bridge.apply(&ConfigurationEvent::delete(RootCategory::Podcast, feed));
    assert!(!index.contains("p1"));
    assert!(index.contains(&episode));

    assert_eq!(index.clean().orphaned, 1);
    assert!(index.is_empty());
}

#[test]
fn podcast_updates_racing_the_sweep_keep_episodes() {
    let bridge = ConfigurationBridge::new(MediaIndex::new());
    let index = bridge.index().clone();
    let feed = ConfigurationNode::new("p1", "News", "https://example.org/feed.xml");
    bridge.apply(&ConfigurationEvent::add(RootCategory::Podcast, feed.clone()));
    let episode = index.add(IndexElement::discovered(
        "p1",
        RootCategory::Podcast,
        "https://example.org/ep1.mp3",
        "Episode 1",
        false,
    ));

    let update = ConfigurationEvent::update(RootCategory::Podcast, feed);
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..2_000 {
                bridge.apply(&update);
            }
        });
        scope.spawn(|| {
            for _ in 0..2_000 {
                assert_eq!(index.clean().removed(), 0);
            }
        });
    });

    assert!(index.contains("p1"));
    assert!(index.contains(&episode));
}

#[test]
fn seed_registers_every_configured_folder() {
    let mut config = MediaConfig::default();
    config
        .video_folders
        .push(ConfigurationNode::new("v1", "Movies", "/media/video"));
    config
        .audio_folders
        .push(ConfigurationNode::new("a1", "Music", "/media/music"));
    let bridge = ConfigurationBridge::new(MediaIndex::new());
    bridge.seed(&config);
    bridge.seed(&config);

    let ids: Vec<String> = bridge
        .index()
        .entries()
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(ids, vec!["a1".to_string(), "v1".to_string()]);
    assert!(bridge.index().entries().iter().all(|(_, e)| e.locked));
}
