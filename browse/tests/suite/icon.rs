use mediadir_browse::BrowseError;
use mediadir_browse::BrowseRequest;
use mediadir_browse::Candidate;
use mediadir_browse::CandidateId;
use mediadir_browse::ContentDirectory;
use mediadir_browse::MimeType;
use mediadir_browse::NodePayload;
use mediadir_browse::ResolvedParent;
use mediadir_browse::Resolver;
use mediadir_config::RootCategory;
use mediadir_index::IndexElement;
use mediadir_index::MediaIndex;

/// Feed-like resolver whose third entry carries `icon`.
struct Episodes {
    icon: &'static str,
}

impl Resolver for Episodes {
    fn children(&self, parent: &ResolvedParent) -> mediadir_browse::Result<Vec<Candidate>> {
        Ok((0..4)
            .map(|n| {
                let name = format!("Episode {n}");
                let candidate = Candidate::new(
                    CandidateId::Discovered(IndexElement::discovered(
                        parent.id.as_str(),
                        RootCategory::Podcast,
                        format!("https://example.org/{n}.mp3"),
                        name.as_str(),
                        false,
                    )),
                    name,
                    NodePayload::Content {
                        mime: MimeType::parse("audio/mpeg").unwrap(),
                        size: 0,
                    },
                );
                if n == 2 {
                    candidate.with_icon_url(self.icon)
                } else {
                    candidate
                }
            })
            .collect())
    }

    fn describe(&self, node: &ResolvedParent) -> mediadir_browse::Result<Candidate> {
        Err(BrowseError::UnknownNode(node.id.clone()))
    }

    fn backing_location(&self, element: &IndexElement) -> Option<String> {
        Some(element.path.clone())
    }
}

#[test]
fn malformed_icon_aborts_the_whole_browse() {
    let directory = ContentDirectory::new(
        MediaIndex::new(),
        Episodes {
            icon: "https://example.org/my cover.png",
        },
        "http://host",
    );
    let err = directory
        .browse(&BrowseRequest::children("4_PODCASTS", 0, 0))
        .unwrap_err();
    assert!(matches!(err, BrowseError::CannotProcess(_)));
    assert_eq!(err.upnp_code(), 720);
}

#[test]
fn malformed_icon_outside_the_window_is_not_encoded() {
    let directory = ContentDirectory::new(
        MediaIndex::new(),
        Episodes { icon: "not a url" },
        "http://host",
    );
    let result = directory
        .browse(&BrowseRequest::children("4_PODCASTS", 0, 2))
        .unwrap();
    assert_eq!(result.number_returned, 2);
    assert_eq!(result.total_matches, 4);
}

#[test]
fn valid_icon_is_attached() {
    let directory = ContentDirectory::new(
        MediaIndex::new(),
        Episodes {
            icon: "https://example.org/cover.png",
        },
        "http://host",
    );
    let result = directory
        .browse(&BrowseRequest::children("4_PODCASTS", 0, 0))
        .unwrap();
    assert_eq!(result.number_returned, 4);
    assert!(
        result
            .result
            .contains("<upnp:icon>https://example.org/cover.png</upnp:icon>")
    );
}

#[test]
fn relative_icon_reference_is_attached_verbatim() {
    let directory = ContentDirectory::new(
        MediaIndex::new(),
        Episodes {
            icon: "covers/folder.png",
        },
        "http://host",
    );
    let result = directory
        .browse(&BrowseRequest::children("4_PODCASTS", 0, 0))
        .unwrap();
    assert_eq!(result.number_returned, 4);
    assert!(
        result
            .result
            .contains("<upnp:icon>covers/folder.png</upnp:icon>")
    );
}
