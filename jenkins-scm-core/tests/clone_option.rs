mod common;

use jenkins_scm_core::clone_option::{append_clone_option, parse_clone_option, CLONE_OPTION_TRAIT};
use jenkins_scm_core::{CloneOption, DecodeError, Element};

use common::child_names;

fn encode(opt: &CloneOption) -> Element {
    let mut traits = Element::new("traits");
    append_clone_option(Some(opt), &mut traits);
    traits
}

struct TestCase {
    name: &'static str,
    input: CloneOption,
    expected: CloneOption,
}

#[test]
fn clone_option_round_trips_with_defaulting() {
    let cases = vec![
        TestCase {
            name: "explicit values survive",
            input: CloneOption {
                shallow: true,
                timeout: Some(20),
                depth: Some(3),
            },
            expected: CloneOption {
                shallow: true,
                timeout: Some(20),
                depth: Some(3),
            },
        },
        TestCase {
            name: "zero is a real value, not unset",
            input: CloneOption {
                shallow: false,
                timeout: Some(0),
                depth: Some(0),
            },
            expected: CloneOption {
                shallow: false,
                timeout: Some(0),
                depth: Some(0),
            },
        },
        TestCase {
            name: "unset timeout and depth take plugin defaults",
            input: CloneOption {
                shallow: true,
                timeout: None,
                depth: None,
            },
            expected: CloneOption {
                shallow: true,
                timeout: Some(10),
                depth: Some(1),
            },
        },
        TestCase {
            name: "only depth unset",
            input: CloneOption {
                shallow: false,
                timeout: Some(45),
                depth: None,
            },
            expected: CloneOption {
                shallow: false,
                timeout: Some(45),
                depth: Some(1),
            },
        },
    ];

    for case in cases {
        let traits = encode(&case.input);
        let decoded = parse_clone_option(Some(&traits))
            .unwrap_or_else(|e| panic!("{}: decode failed: {e}", case.name));
        assert_eq!(decoded.as_ref(), Some(&case.expected), "{}", case.name);

        // Defaulting is idempotent.
        let again = parse_clone_option(Some(&encode(&case.expected))).unwrap();
        assert_eq!(again, Some(case.expected), "{}: re-encode", case.name);
    }
}

#[test]
fn clone_option_layout_is_fixed() {
    let traits = encode(&CloneOption {
        shallow: true,
        timeout: None,
        depth: Some(5),
    });

    assert_eq!(child_names(&traits), vec![CLONE_OPTION_TRAIT]);
    let wrapper = traits.select_element(CLONE_OPTION_TRAIT).unwrap();
    let extension = wrapper.select_element("extension").expect("extension element");
    assert_eq!(
        extension.select_attr("class"),
        Some("hudson.plugins.git.extensions.impl.CloneOption")
    );
    assert_eq!(
        child_names(extension),
        vec!["shallow", "noTags", "honorRefspec", "reference", "timeout", "depth"]
    );

    let text = |name: &str| extension.select_element(name).unwrap().text().to_string();
    assert_eq!(text("shallow"), "true");
    assert_eq!(text("noTags"), "false");
    assert_eq!(text("honorRefspec"), "true");
    assert_eq!(text("reference"), "");
    assert!(!extension.select_element("reference").unwrap().has_text());
    assert_eq!(text("timeout"), "10");
    assert_eq!(text("depth"), "5");
}

#[test]
fn absent_clone_option_emits_nothing() {
    let mut traits = Element::new("traits");
    append_clone_option(None, &mut traits);
    assert!(traits.children().is_empty());
}

#[test]
fn absent_trait_or_extension_decodes_to_none() {
    assert_eq!(parse_clone_option(None), Ok(None));
    assert_eq!(parse_clone_option(Some(&Element::new("traits"))), Ok(None));

    let mut traits = Element::new("traits");
    traits.create_element(CLONE_OPTION_TRAIT);
    assert_eq!(parse_clone_option(Some(&traits)), Ok(None));
}

#[test]
fn missing_scalars_decode_as_unset() {
    let traits = Element::parse(
        r#"<traits>
             <jenkins.plugins.git.traits.CloneOptionTrait>
               <extension class="hudson.plugins.git.extensions.impl.CloneOption"/>
             </jenkins.plugins.git.traits.CloneOptionTrait>
           </traits>"#,
    )
    .unwrap();

    assert_eq!(
        parse_clone_option(Some(&traits)),
        Ok(Some(CloneOption {
            shallow: false,
            timeout: None,
            depth: None,
        }))
    );
}

#[test]
fn unparsable_scalars_are_decode_errors() {
    let fragment = |timeout: &str, shallow: &str| {
        Element::parse(&format!(
            r#"<traits>
                 <jenkins.plugins.git.traits.CloneOptionTrait>
                   <extension class="hudson.plugins.git.extensions.impl.CloneOption">
                     <shallow>{shallow}</shallow>
                     <timeout>{timeout}</timeout>
                     <depth>1</depth>
                   </extension>
                 </jenkins.plugins.git.traits.CloneOptionTrait>
               </traits>"#
        ))
        .unwrap()
    };

    assert_eq!(
        parse_clone_option(Some(&fragment("ten", "true"))),
        Err(DecodeError::InvalidNumber {
            element: "timeout".to_string(),
            value: "ten".to_string(),
        })
    );
    assert_eq!(
        parse_clone_option(Some(&fragment("-1", "true"))),
        Err(DecodeError::InvalidNumber {
            element: "timeout".to_string(),
            value: "-1".to_string(),
        })
    );
    assert_eq!(
        parse_clone_option(Some(&fragment("10", "yes"))),
        Err(DecodeError::InvalidBool {
            element: "shallow".to_string(),
            value: "yes".to_string(),
        })
    );
}
