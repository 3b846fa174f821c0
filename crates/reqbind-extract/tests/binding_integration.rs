//! Query, path and struct binding integration tests.

use http::Uri;
use proptest::prelude::*;
use reqbind_extract::{
    BindError, BindSource, BindUrl, Binder, ConvertError, HttpRequest, ParamTarget, UrlField,
};
use std::sync::Arc;

fn request(uri: &str) -> HttpRequest {
    HttpRequest::builder()
        .uri(uri.parse::<Uri>().unwrap())
        .build()
}

#[derive(Debug, Default, PartialEq)]
struct Search {
    id: i64,
    tags: Vec<String>,
    page: Option<u32>,
    verbose: bool,
}

impl BindUrl for Search {
    fn url_fields() -> &'static [UrlField] {
        const FIELDS: &[UrlField] = &[
            UrlField::new("id").query("id").path("id"),
            UrlField::new("tags").query("tags"),
            UrlField::new("page").query("page"),
            UrlField::new("verbose").query("v"),
        ];
        FIELDS
    }

    fn url_target(&mut self, index: usize) -> Option<&mut dyn ParamTarget> {
        match index {
            0 => Some(&mut self.id),
            1 => Some(&mut self.tags),
            2 => Some(&mut self.page),
            3 => Some(&mut self.verbose),
            _ => None,
        }
    }
}

#[test]
fn test_url_binds_query_into_record() {
    let mut req = request("/search?id=42&tags=a&tags=b&page=3&v=1");
    let binder = Binder::new(&mut req, None, 32);

    let mut search = Search::default();
    binder.url(&mut search).unwrap();

    assert_eq!(
        search,
        Search {
            id: 42,
            tags: vec!["a".into(), "b".into()],
            page: Some(3),
            verbose: true,
        }
    );
}

#[test]
fn test_url_path_wins_over_query() {
    let mut req = HttpRequest::builder()
        .uri(Uri::from_static("/items/7?id=3"))
        .path_param("id", "7")
        .build();
    let binder = Binder::new(&mut req, None, 32);

    let mut search = Search::default();
    binder.url(&mut search).unwrap();

    assert_eq!(search.id, 7);
}

#[test]
fn test_url_empty_path_value_keeps_query() {
    let mut req = HttpRequest::builder()
        .uri(Uri::from_static("/items?id=3"))
        .path_param("id", "")
        .build();
    let binder = Binder::new(&mut req, None, 32);

    let mut search = Search::default();
    binder.url(&mut search).unwrap();

    assert_eq!(search.id, 3);
}

#[test]
fn test_url_single_value_into_sequence() {
    let mut req = request("/?tags=only");
    let binder = Binder::new(&mut req, None, 32);

    let mut search = Search::default();
    binder.url(&mut search).unwrap();

    assert_eq!(search.tags, ["only"]);
}

#[test]
fn test_url_keeps_earlier_writes_on_error() {
    let mut req = request("/?id=5&tags=x&page=-1");
    let binder = Binder::new(&mut req, None, 32);

    let mut search = Search::default();
    let err = binder.url(&mut search).unwrap_err();

    assert_eq!(err.key(), Some("page"));
    assert_eq!(search.id, 5);
    assert_eq!(search.tags, ["x"]);
    assert_eq!(search.page, None);
}

#[test]
fn test_query_into_shared_arc_is_pointer_target() {
    let mut req = request("/?id=1");
    let binder = Binder::new(&mut req, None, 32);

    let mut id = Arc::new(0i64);
    let _other = Arc::clone(&id);

    assert!(matches!(
        binder.query("id", &mut id),
        Err(BindError::PointerTarget)
    ));
}

#[test]
fn test_query_into_unique_arc() {
    let mut req = request("/?id=1");
    let binder = Binder::new(&mut req, None, 32);

    let mut id = Arc::new(0i64);
    binder.query("id", &mut id).unwrap();
    assert_eq!(*id, 1);
}

#[test]
fn test_query_bool_literals() {
    let mut req = request("/?a=true&b=F&c=yes");
    let binder = Binder::new(&mut req, None, 32);

    let (mut a, mut b, mut c) = (false, true, false);
    binder.query("a", &mut a).unwrap();
    binder.query("b", &mut b).unwrap();
    let err = binder.query("c", &mut c).unwrap_err();

    assert!(a);
    assert!(!b);
    assert!(matches!(
        err,
        BindError::Convert {
            origin: BindSource::Query,
            error: ConvertError::InvalidLiteral { .. },
            ..
        }
    ));
}

#[test]
fn test_query_empty_value_into_string() {
    let mut req = request("/?name=");
    let binder = Binder::new(&mut req, None, 32);

    let mut name = String::from("before");
    binder.query("name", &mut name).unwrap();
    assert_eq!(name, "");
}

proptest! {
    #[test]
    fn prop_query_integer_round_trip(n in any::<i64>()) {
        let mut req = request(&format!("/?n={n}"));
        let binder = Binder::new(&mut req, None, 32);

        let mut value = 0i64;
        binder.query("n", &mut value).unwrap();
        prop_assert_eq!(value, n);
    }

    #[test]
    fn prop_absent_query_key_is_missing(key in "[a-z]{1,8}") {
        prop_assume!(key != "present");
        let mut req = request("/?present=1");
        let binder = Binder::new(&mut req, None, 32);

        let mut value = 0i64;
        let err = binder.query(&key, &mut value).unwrap_err();
        prop_assert!(matches!(err, BindError::QueryMissing { .. }), "got {:?}", err);
        prop_assert_eq!(value, 0);
    }

    #[test]
    fn prop_absent_path_key_is_missing(key in "[a-z]{1,8}") {
        let mut req = HttpRequest::builder().build();
        let binder = Binder::new(&mut req, None, 32);

        let mut value = String::new();
        let err = binder.path_value(&key, &mut value).unwrap_err();
        prop_assert!(matches!(err, BindError::PathValueMissing { .. }), "got {:?}", err);
    }
}
