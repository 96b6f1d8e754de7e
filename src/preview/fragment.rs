//! Server-rendered form markup, classified into the widgets the editor knows how to render.
//!
//! The host parses form markup into a [`RawFragment`] tree. [`Fragment::parse`] turns it into a
//! closed set of variants once, up front; everything the editor does not recognize becomes
//! [`Fragment::Markup`] and is passed through untouched.
//!
//! The editor keeps forms as the server sent them (see `OpenForm`). The host parses the markup
//! it renders and calls [`Fragment::parse`] on the result itself.

use std::collections::BTreeMap;

/// An element as the host parsed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFragment {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<RawFragment>,
    /// Text content directly inside the element.
    pub text: String,
}

impl RawFragment {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn child(mut self, child: RawFragment) -> Self {
        self.children.push(child);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

/// Attributes every form widget carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub name: Option<String>,
    pub value: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl Field {
    fn from_raw(raw: &RawFragment) -> Self {
        Self {
            name: raw.get("name").map(str::to_owned),
            value: raw.get("value").map(str::to_owned),
            attributes: raw.attributes.clone(),
        }
    }
}

/// Form markup after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Form {
        action: Option<String>,
        children: Vec<Fragment>,
    },
    /// Wrapper around one widget with its label and description.
    FormElement {
        label: Option<String>,
        children: Vec<Fragment>,
    },
    Input {
        input_type: String,
        field: Field,
    },
    Checkbox {
        field: Field,
        checked: bool,
    },
    /// A group of radio buttons sharing a name.
    Radios {
        name: Option<String>,
        options: Vec<Field>,
        selected: Option<String>,
    },
    Select {
        field: Field,
        options: Vec<(String, String)>,
        selected: Option<String>,
    },
    Textarea {
        field: Field,
        text: String,
    },
    Details {
        summary: String,
        open: bool,
        children: Vec<Fragment>,
    },
    Fieldset {
        legend: Option<String>,
        children: Vec<Fragment>,
    },
    Button {
        field: Field,
        label: String,
    },
    /// Anything else, kept as-is.
    Markup(RawFragment),
}

impl Fragment {
    pub fn parse(raw: &RawFragment) -> Self {
        let children = || -> Vec<Fragment> { raw.children.iter().map(Fragment::parse).collect() };

        match raw.tag.as_str() {
            "form" => Fragment::Form {
                action: raw.get("action").map(str::to_owned),
                children: children(),
            },
            "input" => parse_input(raw),
            "select" => {
                let options: Vec<_> = raw
                    .children
                    .iter()
                    .filter(|c| c.tag == "option")
                    .map(|c| (c.get("value").unwrap_or(c.text.as_str()).to_owned(), c.text.clone()))
                    .collect();
                let selected = raw
                    .children
                    .iter()
                    .filter(|c| c.tag == "option")
                    .find(|c| c.attributes.contains_key("selected"))
                    .map(|c| c.get("value").unwrap_or(c.text.as_str()).to_owned());
                Fragment::Select {
                    field: Field::from_raw(raw),
                    options,
                    selected,
                }
            }
            "textarea" => Fragment::Textarea {
                field: Field::from_raw(raw),
                text: raw.text.clone(),
            },
            "button" => Fragment::Button {
                field: Field::from_raw(raw),
                label: raw.text.clone(),
            },
            "details" => {
                let summary = raw
                    .children
                    .iter()
                    .find(|c| c.tag == "summary")
                    .map(|c| c.text.clone())
                    .unwrap_or_default();
                Fragment::Details {
                    summary,
                    open: raw.attributes.contains_key("open"),
                    children: raw
                        .children
                        .iter()
                        .filter(|c| c.tag != "summary")
                        .map(Fragment::parse)
                        .collect(),
                }
            }
            "fieldset" if raw.has_class("form-radios") => parse_radios(raw),
            "fieldset" => Fragment::Fieldset {
                legend: raw
                    .children
                    .iter()
                    .find(|c| c.tag == "legend")
                    .map(|c| c.text.clone()),
                children: raw
                    .children
                    .iter()
                    .filter(|c| c.tag != "legend")
                    .map(Fragment::parse)
                    .collect(),
            },
            "div" if raw.has_class("form-radios") => parse_radios(raw),
            "div" if raw.has_class("form-item") => Fragment::FormElement {
                label: raw
                    .children
                    .iter()
                    .find(|c| c.tag == "label")
                    .map(|c| c.text.clone()),
                children: raw
                    .children
                    .iter()
                    .filter(|c| c.tag != "label")
                    .map(Fragment::parse)
                    .collect(),
            },
            _ => Fragment::Markup(raw.clone()),
        }
    }

    /// Name of the form value this fragment edits, if it edits one.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Fragment::Input { field, .. }
            | Fragment::Checkbox { field, .. }
            | Fragment::Select { field, .. }
            | Fragment::Textarea { field, .. } => field.name.as_deref(),
            Fragment::Radios { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    /// This fragment and all fragments nested inside it, depth-first.
    pub fn walk(&self) -> Vec<&Fragment> {
        let mut out = vec![self];
        let children: &[Fragment] = match self {
            Fragment::Form { children, .. }
            | Fragment::FormElement { children, .. }
            | Fragment::Details { children, .. }
            | Fragment::Fieldset { children, .. } => children.as_slice(),
            _ => &[],
        };
        for child in children {
            out.extend(child.walk());
        }
        out
    }
}

fn parse_input(raw: &RawFragment) -> Fragment {
    let input_type = raw.get("type").unwrap_or("text");
    match input_type {
        "checkbox" => Fragment::Checkbox {
            field: Field::from_raw(raw),
            checked: raw.attributes.contains_key("checked"),
        },
        "submit" | "button" => Fragment::Button {
            field: Field::from_raw(raw),
            label: raw.get("value").unwrap_or_default().to_owned(),
        },
        _ => Fragment::Input {
            input_type: input_type.to_owned(),
            field: Field::from_raw(raw),
        },
    }
}

fn parse_radios(raw: &RawFragment) -> Fragment {
    let mut radios = Vec::new();
    collect_radios(raw, &mut radios);

    let name = radios.first().and_then(|r| r.get("name")).map(str::to_owned);
    let selected = radios
        .iter()
        .find(|r| r.attributes.contains_key("checked"))
        .and_then(|r| r.get("value"))
        .map(str::to_owned);

    Fragment::Radios {
        name,
        options: radios.into_iter().map(Field::from_raw).collect(),
        selected,
    }
}

fn collect_radios<'a>(raw: &'a RawFragment, out: &mut Vec<&'a RawFragment>) {
    for child in &raw.children {
        if child.tag == "input" && child.get("type") == Some("radio") {
            out.push(child);
        } else {
            collect_radios(child, out);
        }
    }
}
