    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    fn var(name: &str) -> Node {
        Node::Variable {
            name: name.to_string(),
            escape: true,
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("# Rules\nBe kind.\n").unwrap(), vec![text("# Rules\nBe kind.\n")]);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_variables() {
        let nodes = parse("Hi {{ name }}, {{{raw}}} and {{& amp}}").unwrap();
        assert_eq!(
            nodes,
            vec![
                text("Hi "),
                var("name"),
                text(", "),
                Node::Variable {
                    name: "raw".to_string(),
                    escape: false
                },
                text(" and "),
                Node::Variable {
                    name: "amp".to_string(),
                    escape: false
                },
            ]
        );
    }

    #[test]
    fn test_nested_sections() {
        let nodes = parse("{{#a}}x{{^b}}y{{/b}}{{/a}}").unwrap();
        assert_eq!(
            nodes,
            vec![Node::Section {
                name: "a".to_string(),
                inverted: false,
                children: vec![
                    text("x"),
                    Node::Section {
                        name: "b".to_string(),
                        inverted: true,
                        children: vec![text("y")],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_standalone_lines_are_removed() {
        let nodes = parse("Tools:\n  {{#tools}}\n- {{.}}\n  {{/tools}}\nEnd\n").unwrap();
        assert_eq!(
            nodes,
            vec![
                text("Tools:\n"),
                Node::Section {
                    name: "tools".to_string(),
                    inverted: false,
                    children: vec![text("- "), var("."), text("\n")],
                },
                text("End\n"),
            ]
        );
    }

    #[test]
    fn test_inline_tags_keep_whitespace() {
        let nodes = parse("a {{#x}} b {{/x}}\n").unwrap();
        assert_eq!(nodes[0], text("a "));
        assert_eq!(nodes[2], text("\n"));
    }

    #[test]
    fn test_comment_line_is_removed() {
        assert_eq!(parse("one\n{{! note }}\ntwo").unwrap(), vec![text("one\ntwo")]);
        assert_eq!(parse("one {{! note }}two").unwrap(), vec![text("one two")]);
    }

    #[test]
    fn test_set_delimiters() {
        let nodes = parse("{{=<% %>=}}\n<% name %> {{literal}}").unwrap();
        assert_eq!(nodes, vec![var("name"), text(" {{literal}}")]);
    }

    #[test]
    fn test_unclosed_tag() {
        let err = parse("line one\nvalue {{name").unwrap_err();
        assert_eq!(err, TemplateError::UnclosedTag { line: 2, column: 7 });
    }

    #[test]
    fn test_unclosed_section() {
        let err = parse("line one\n{{#if}}never closed\n").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnclosedSection {
                name: "if".to_string(),
                line: 2,
                column: 1
            }
        );
    }

    #[test]
    fn test_mismatched_section() {
        let err = parse("{{#a}}{{/b}}").unwrap_err();
        assert!(matches!(err, TemplateError::UnclosedSection { ref name, .. } if name == "a"));
    }

    #[test]
    fn test_unopened_section() {
        let err = parse("text {{/a}}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnopenedSection {
                name: "a".to_string(),
                line: 1,
                column: 6
            }
        );
    }

    #[test]
    fn test_invalid_delimiters() {
        let err = parse("{{=<%=}}").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidDelimiters { .. }));
    }
