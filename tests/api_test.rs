use xpr_core::{compile, Node, RuleGroup};

#[test]
fn test_compile_to_json() {
    let source = r"
        @name NEWS,
        @includes { /news, }
        ARTICLE /article * {
            HEADLINE /h1,
            LINK /a [href] 'link',
        }
    ";

    let expected_json = serde_json::json!({
        "name": "NEWS",
        "includes": ["/news"],
        "excludes": [],
        "nodes": [{
            "key": "ARTICLE",
            "xpath": "/article",
            "nodes": [
                { "key": "HEADLINE", "xpath": "/h1", "multi": true, "attribute": null, "custom": null },
                { "key": "LINK", "xpath": "/a", "multi": true, "attribute": "href", "custom": ";link" }
            ]
        }]
    });

    let group = compile(source, "news.xpr").unwrap();
    let result_json = serde_json::to_value(&group).unwrap();

    assert_eq!(result_json, expected_json);
}

#[test]
fn test_json_round_trip() {
    let source = "@name R, @includes { /a, } @excludes { /a/b, } A /a { B /b * [x], C /c { D /d 'e', } } /f,";
    let group = compile(source, "round_trip.xpr").unwrap();

    let text = serde_json::to_string(&group).unwrap();
    let back: RuleGroup = serde_json::from_str(&text).unwrap();
    assert_eq!(back, group);
}

#[test]
fn test_parse_is_deterministic() {
    let source = "@name R, @includes { /a, /b, } A /a * { B /b, } C /c,";
    let first = compile(source, "a.xpr").unwrap();
    let second = compile(source, "a.xpr").unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_top_level_leaf_is_not_multi_by_default() {
    let group = compile("@name R, @includes { /a, } /title,", "a.xpr").unwrap();
    match &group.nodes[0] {
        Node::Child(child) => assert!(!child.multi),
        Node::Parent(_) => panic!("expected a leaf"),
    }
}
