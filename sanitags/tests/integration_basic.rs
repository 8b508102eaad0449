//! End-to-end tests for the public sanitization API.
//!
//! These tests exercise the integration of:
//! - `Sanitize` derive traversal,
//! - the process-wide registry installed with `setup`, and
//! - string and string-list policy application at every nesting depth.

use regex::Regex;
use sanitags::{sanitize_record, PolicyConfig, Sanitize};

fn strip_all(s: &str) -> String {
    Regex::new(r"<[^>]*>").unwrap().replace_all(s, "").into_owned()
}

fn safe_ugc(s: &str) -> String {
    Regex::new(r"<script[^>]*>.*</script>")
        .unwrap()
        .replace_all(s, "")
        .into_owned()
}

// Every test in this binary installs the same functions, so parallel tests
// never observe a different mapping.
fn init() {
    sanitags::setup(
        PolicyConfig::new()
            .with_strip_all(strip_all)
            .with_safe_user_generated_content(safe_ugc),
    );
}

#[test]
fn test_user_fields_and_lists() {
    init();

    #[derive(Debug, PartialEq, Sanitize)]
    struct User {
        id: i32,
        #[sanitags("strip-all")]
        name: String,
        #[sanitags("safe-user-generated-content")]
        bio: String,
        active: bool,
        #[sanitags("strip-all")]
        tags: Vec<String>,
        #[sanitags("safe-user-generated-content")]
        interests: Vec<String>,
        favorites: Vec<String>,
    }

    let mut input = User {
        id: 1,
        name: "<h1>John Doe</h1>".into(),
        bio: "<script>alert('xss')</script><b>bio</b>".into(),
        active: true,
        tags: vec!["<script></script>tag1".into(), "<b>tag2</b>".into()],
        interests: vec![
            "<script>alert('xss')</script>interest1".into(),
            "<b>interest2</b>".into(),
        ],
        favorites: vec![
            "<script>alert('xss')</script>favorite1".into(),
            "<b>favorite2</b>".into(),
        ],
    };

    sanitize_record(&mut input).unwrap();

    let expected = User {
        id: 1,
        name: "John Doe".into(),
        bio: "<b>bio</b>".into(),
        active: true,
        tags: vec!["tag1".into(), "tag2".into()],
        interests: vec!["interest1".into(), "<b>interest2</b>".into()],
        favorites: vec![
            "<script>alert('xss')</script>favorite1".into(),
            "<b>favorite2</b>".into(),
        ],
    };
    assert_eq!(input, expected);
}

#[test]
fn test_name_and_bio_scenario() {
    init();

    #[derive(Sanitize)]
    struct Profile {
        #[sanitags("strip-all")]
        name: String,
        #[sanitags("safe-user-generated-content")]
        bio: String,
    }

    let mut profile = Profile {
        name: "<h1>John</h1>".into(),
        bio: "<script>a</script><b>bio</b>".into(),
    };
    profile.sanitize().unwrap();

    assert_eq!(profile.name, "John");
    assert_eq!(profile.bio, "<b>bio</b>");
}

#[derive(Debug, PartialEq, Sanitize)]
struct Address {
    #[sanitags("strip-all")]
    city: String,
    #[sanitags("strip-all")]
    country: String,
}

#[derive(Debug, PartialEq, Sanitize)]
struct Person {
    id: i32,
    #[sanitags("strip-all")]
    name: String,
    address: Address,
}

#[test]
fn test_nested_struct() {
    init();

    let mut input = Person {
        id: 1,
        name: "<h1>John Doe</h1>".into(),
        address: Address {
            city: "<script></script>".into(),
            country: "<b>country</b>".into(),
        },
    };
    sanitize_record(&mut input).unwrap();

    assert_eq!(
        input,
        Person {
            id: 1,
            name: "John Doe".into(),
            address: Address {
                city: String::new(),
                country: "country".into(),
            },
        }
    );
}

#[test]
fn test_deeply_nested_struct() {
    init();

    #[derive(Debug, PartialEq, Sanitize)]
    struct Account {
        person: Person,
    }

    #[derive(Debug, PartialEq, Sanitize)]
    struct Envelope {
        note: String,
        account: Account,
    }

    let mut input = Envelope {
        note: "<i>untouched</i>".into(),
        account: Account {
            person: Person {
                id: 1,
                name: "<h1>John Doe</h1>".into(),
                address: Address {
                    city: "<script></script>".into(),
                    country: "<b>country</b>".into(),
                },
            },
        },
    };
    sanitize_record(&mut input).unwrap();

    assert_eq!(input.note, "<i>untouched</i>");
    assert_eq!(input.account.person.name, "John Doe");
    assert_eq!(input.account.person.address.city, "");
    assert_eq!(input.account.person.address.country, "country");
}

#[test]
fn test_no_tags_leaves_record_unchanged() {
    init();

    #[derive(Clone, Debug, PartialEq, Sanitize)]
    struct Plain {
        id: i32,
        name: String,
        tags: Vec<String>,
        score: f64,
        nickname: Option<String>,
    }

    let original = Plain {
        id: 1,
        name: "<h1>John Doe</h1>".into(),
        tags: vec!["<script></script>tag1".into()],
        score: 0.5,
        nickname: Some("<b>jd</b>".into()),
    };
    let mut input = original.clone();
    sanitize_record(&mut input).unwrap();

    assert_eq!(input, original);
}

#[test]
fn test_strip_all_list_scenario() {
    init();

    #[derive(Sanitize)]
    struct Post {
        #[sanitags("strip-all")]
        tags: Vec<String>,
    }

    let mut post = Post {
        tags: vec!["<script></script>tag1".into(), "<b>tag2</b>".into()],
    };
    post.sanitize().unwrap();

    assert_eq!(post.tags, ["tag1", "tag2"]);
}

#[test]
fn test_empty_tagged_list_is_fine() {
    init();

    #[derive(Sanitize)]
    struct Post {
        #[sanitags("strip-all")]
        tags: Vec<String>,
    }

    let mut post = Post { tags: Vec::new() };
    post.sanitize().unwrap();

    assert!(post.tags.is_empty());
}

#[test]
fn test_second_run_is_stable_for_idempotent_functions() {
    init();

    let mut input = Person {
        id: 2,
        name: "<p>Ada</p>".into(),
        address: Address {
            city: "<b>London</b>".into(),
            country: "UK".into(),
        },
    };
    sanitize_record(&mut input).unwrap();
    let once = (input.name.clone(), input.address.city.clone());
    sanitize_record(&mut input).unwrap();

    assert_eq!((input.name, input.address.city), once);
}
