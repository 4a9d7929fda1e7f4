use super::*;
use pretty_assertions::assert_eq;
use std::rc::Rc;

fn expr_values(values: Vec<OwnedValue>) -> OwnedValue {
    Value::new(ValueKind::Expression(ExpressionBody::Values(values)))
}

// ─── End-to-end scenarios ──────────────────────────────────────────

#[test]
fn scalar_documents() {
    assert_eq!(loads("null").unwrap(), Value::null());
    assert_eq!(loads("true").unwrap(), Value::from(true));
    assert_eq!(loads("-123").unwrap(), Value::from(-123i64));
    assert!(loads("-123").unwrap().as_i64().is_some());
}

#[test]
fn number_suffix_hook_produces_pair() {
    let mut parser = Parser::new("25.25%");
    parser.set_number_suffix_constructor(
        "%",
        Rc::new(|value| Ok(Value::from(vec![value, Value::from("%".to_string())]))),
    );
    assert_eq!(
        parser.parse().unwrap(),
        Value::from(vec![Value::from(25.25), Value::from("%".to_string())])
    );
}

#[test]
fn raw_heredoc_string() {
    // Six chars: a b c \ t \
    assert_eq!(
        loads(r#"r"HEREDOC(abc\t\)HEREDOC""#).unwrap(),
        Value::from("abc\\t\\".to_string())
    );
}

#[test]
fn base64_byte_string() {
    assert_eq!(
        loads("b64\"anhjIGZvcm1hdA==\"").unwrap(),
        Value::from(b"jxc format".to_vec())
    );
}

#[test]
fn datetime_with_offset() {
    let value = loads("dt\"2000-01-01T12:47:05-08:00\"").unwrap();
    let datetime = value.as_datetime().unwrap();
    assert_eq!(
        datetime.offset.map(|o| o.local_minus_utc()),
        Some(-8 * 3600)
    );
    assert_eq!(datetime.datetime.to_string(), "2000-01-01 12:47:05");
}

#[test]
fn annotation_hook_builds_host_value() {
    #[derive(Debug, PartialEq)]
    struct Vec3 {
        x: f64,
        y: f64,
        z: f64,
    }

    let built = Rc::new(std::cell::RefCell::new(None));
    let sink = Rc::clone(&built);
    let mut parser = Parser::new("vec3{ x: 1, y: 2, z: 3 }");
    parser
        .set_annotation_constructor(
            "vec3",
            // Build the host struct from keyword args; the tree keeps null
            AnnotationConstructor::dict_as_keyword_args(move |pairs| {
                let field = |name: &str| {
                    pairs
                        .iter()
                        .find(|(k, _)| k == name)
                        .and_then(|(_, v)| v.as_f64())
                        .unwrap_or(0.0)
                };
                *sink.borrow_mut() = Some(Vec3 {
                    x: field("x"),
                    y: field("y"),
                    z: field("z"),
                });
                Ok(Value::null())
            }),
        )
        .unwrap();
    parser.parse().unwrap();
    assert_eq!(
        built.borrow().as_ref(),
        Some(&Vec3 {
            x: 1.0,
            y: 2.0,
            z: 3.0
        })
    );
}

#[test]
fn dumps_compact_array() {
    let value = Value::from(vec![
        Value::from(true),
        Value::from(1234i64),
        Value::from("oh hai".to_string()),
    ]);
    assert_eq!(dumps(&value).unwrap(), r#"[true,1234,"oh hai"]"#);
}

#[test]
fn dumps_annotated_object() {
    let mut ser = Serializer::new_string(SerializerSettings::compact());
    ser.annotation("quat").unwrap();
    ser.object_begin().unwrap();
    for (key, value) in [("x", 0.0), ("y", 0.0), ("z", 0.0), ("w", 1.0)] {
        ser.identifier(key).unwrap();
        ser.object_sep().unwrap();
        ser.value_float(value).unwrap();
    }
    ser.object_end().unwrap();
    assert_eq!(ser.finish().unwrap(), "quat{x:0.0,y:0.0,z:0.0,w:1.0}");
}

#[test]
fn duplicate_keys_policy() {
    let value = loads("{a:1, a:2}").unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object.get("a"), Some(&Value::from(2i64)));

    let options = ParseOptions {
        object_policy: ObjectPolicy::KeepDuplicates,
        ..ParseOptions::default()
    };
    let value = loads_with("{a:1, a:2}", options).unwrap();
    let pairs: Vec<(&str, i64)> = value
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, v)| (k, v.as_i64().unwrap_or(0)))
        .collect();
    assert_eq!(pairs, vec![("a", 1), ("a", 2)]);
}

#[test]
fn expression_value_list() {
    assert_eq!(
        loads("(1 + 2 - 3)").unwrap(),
        expr_values(vec![
            Value::from(1i64),
            Value::from("+".to_string()),
            Value::from(2i64),
            Value::from("-".to_string()),
            Value::from(3i64),
        ])
    );
}

// ─── Streaming surfaces ────────────────────────────────────────────

#[test]
fn lex_surface() {
    let tokens = lex("vec3[1, 2] # done").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::SquareBracketOpen,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::Number,
            TokenKind::SquareBracketClose,
            TokenKind::Comment,
        ]
    );
}

#[test]
fn elements_surface() {
    let stream = elements("{x: 1}").unwrap();
    let kinds: Vec<ElementKind> = stream.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::BeginObject,
            ElementKind::ObjectKey,
            ElementKind::Value,
            ElementKind::EndObject,
        ]
    );
}

#[test]
fn errors_are_enriched_and_render_snippets() {
    let src = "{\n  x: ]\n}";
    let err = loads(src).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Structure);
    assert_eq!((err.info.line, err.info.col), (2, 6));
    let rendered = err.render(src);
    assert!(rendered.contains("x: ]"));
    assert!(rendered.contains('^'));
}

#[test]
fn pretty_dumps_round_trips() {
    let value = loads("{a: [1, 2.5], b: {c: 'text'}, d: (1 + 2)}").unwrap();
    let pretty = dumps_pretty(&value).unwrap();
    assert_eq!(loads(&pretty).unwrap(), value);
    assert!(pretty.contains('\n'));
}

// ─── Property tests ────────────────────────────────────────────────

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn scalar_value() -> impl Strategy<Value = OwnedValue> {
        prop_oneof![
            Just(Value::null()),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_map(|f| Value::from(if f.is_finite() { f } else { 0.0 })),
            any::<String>().prop_map(Value::from),
            proptest::collection::vec(any::<u8>(), 0..32).prop_map(Value::from),
            (1i32..=9999, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
                match jxc_ir::NaiveDate::from_ymd_opt(y, m, d) {
                    Some(date) => Value::from(date),
                    None => Value::null(),
                }
            }),
        ]
    }

    fn identifier_key() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_]{0,7}"
    }

    fn value_tree() -> impl Strategy<Value = OwnedValue> {
        scalar_value().prop_recursive(3, 24, 6, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::from),
                proptest::collection::vec((identifier_key(), inner), 0..6).prop_map(|pairs| {
                    let mut object = Object::new();
                    for (key, value) in pairs {
                        object.insert(key, value);
                    }
                    Value::from(object)
                }),
            ]
        })
    }

    proptest! {
        /// Compact serialize-then-parse is the identity on value trees.
        #[test]
        fn round_trip_compact(value in value_tree()) {
            let rendered = dumps(&value).unwrap();
            let reparsed = loads(&rendered).unwrap();
            prop_assert_eq!(&reparsed, &value, "via {}", rendered);
        }

        /// Pretty serialize-then-parse is also the identity.
        #[test]
        fn round_trip_pretty(value in value_tree()) {
            let rendered = dumps_pretty(&value).unwrap();
            let reparsed = loads(&rendered).unwrap();
            prop_assert_eq!(&reparsed, &value, "via {}", rendered);
        }

        /// Re-concatenating token values with the original inter-token
        /// whitespace reproduces the input byte-for-byte.
        #[test]
        fn lex_covers_input(value in value_tree()) {
            let src = dumps_pretty(&value).unwrap();
            let tokens = lex(&src).unwrap();
            let mut rebuilt = String::new();
            let mut pos = 0usize;
            for token in &tokens {
                let range = token.span.to_range();
                prop_assert!(range.start >= pos);
                rebuilt.push_str(&src[pos..range.start]);
                rebuilt.push_str(&token.value);
                pos = range.end;
            }
            rebuilt.push_str(&src[pos..]);
            prop_assert_eq!(rebuilt, src);
        }

        /// Every `Begin*` element has a matching `End*` at the same depth,
        /// and object pair counts equal their key counts.
        #[test]
        fn element_stream_is_balanced(value in value_tree()) {
            let src = dumps(&value).unwrap();
            let stream = elements(&src).unwrap();
            let mut depth = 0i64;
            let mut keys = 0usize;
            for element in &stream {
                match element.kind {
                    ElementKind::BeginArray
                    | ElementKind::BeginObject
                    | ElementKind::BeginExpression => depth += 1,
                    ElementKind::EndArray
                    | ElementKind::EndObject
                    | ElementKind::EndExpression => {
                        depth -= 1;
                        prop_assert!(depth >= 0);
                    }
                    ElementKind::ObjectKey => keys += 1,
                    _ => {}
                }
            }
            prop_assert_eq!(depth, 0);
            let value_count = stream
                .iter()
                .filter(|e| {
                    matches!(
                        e.kind,
                        ElementKind::Value
                            | ElementKind::BeginArray
                            | ElementKind::BeginObject
                            | ElementKind::BeginExpression
                    )
                })
                .count();
            // Every key is followed by exactly one value or opener
            prop_assert!(value_count >= keys);
        }

        /// `split_number` and `join_number` are inverses on generated
        /// literals.
        #[test]
        fn number_split_join_inverse(
            sign in prop_oneof![Just(""), Just("+"), Just("-")],
            int_digits in "[0-9]{1,18}",
            frac in proptest::option::of("[0-9]{1,9}"),
            exp in proptest::option::of(-20i32..20),
            suffix in prop_oneof![Just(String::new()), Just("%".to_string()), "[a-z]{1,4}".prop_map(|s| s)],
        ) {
            let mut literal = format!("{sign}{int_digits}");
            if let Some(frac) = &frac {
                literal.push('.');
                literal.push_str(frac);
            }
            if let Some(exp) = exp {
                literal.push_str(&format!("e{exp}"));
            }
            literal.push_str(&suffix);

            let split = split_number(&literal).unwrap();
            prop_assert_eq!(join_number(&split), literal.clone());
            prop_assert_eq!(split.suffix, suffix.as_str());
            if frac.is_some() || exp.is_some_and(|e| e < 0) {
                prop_assert!(split.is_floating_point());
            }
        }

        /// The element stream is invariant under whitespace layout.
        #[test]
        fn elements_ignore_layout(value in value_tree()) {
            let compact = dumps(&value).unwrap();
            let pretty = dumps_pretty(&value).unwrap();
            let reduce = |src: &str| -> Vec<(ElementKind, String, String)> {
                elements(src)
                    .unwrap()
                    .into_iter()
                    .filter(|e| e.kind != ElementKind::Comment)
                    .map(|e| {
                        (
                            e.kind,
                            e.token.value.to_string(),
                            e.annotation.normalized(),
                        )
                    })
                    .collect()
            };
            prop_assert_eq!(reduce(&compact), reduce(&pretty));
        }
    }
}
