use {
    crate::ForgeError,
    log::debug,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Placeholders every template may use without an explicit binding, and the
/// value each one falls back to. Partition defaults to the standard `aws`
/// partition; region and account fall back to the `*` wildcard. All other
/// placeholders must be bound by the caller.
const WILDCARD_DEFAULTS: [(&str, &str); 3] = [("Partition", "aws"), ("Region", "*"), ("Account", "*")];

/// An ARN template from a resource-type table, parsed into an ordered
/// sequence of literal runs and `${Name}` placeholders.
///
/// Templates are parsed once when the catalogue is loaded so that malformed
/// placeholders are rejected up front rather than at expansion time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArnTemplate {
    template: String,
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

impl ArnTemplate {
    /// Expand the template against caller-supplied placeholder bindings.
    ///
    /// Segment order is preserved exactly as declared; substitution is
    /// literal, with no escaping. An explicit binding always wins over the
    /// wildcard defaults. A placeholder with neither a binding nor a default
    /// is an error, and nothing is returned.
    pub fn expand(&self, bindings: &[(&str, &str)]) -> Result<String, ForgeError> {
        let mut result = String::with_capacity(self.template.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Placeholder(name) => {
                    let bound = bindings.iter().find(|(key, _)| key == name).map(|(_, value)| *value);
                    let default =
                        WILDCARD_DEFAULTS.iter().find(|(key, _)| key == name).map(|(_, value)| *value);

                    match bound.or(default) {
                        Some(value) => result.push_str(value),
                        None => {
                            debug!("Template {} has no binding for ${{{}}}", self.template, name);
                            return Err(ForgeError::UnboundPlaceholder(name.clone()));
                        }
                    }
                }
            }
        }

        Ok(result)
    }

    /// The placeholder names in declaration order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl FromStr for ArnTemplate {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut i = s.chars();

        while let Some(c) = i.next() {
            if c != '$' {
                literal.push(c);
                continue;
            }

            match i.next() {
                Some('{') => (),
                _ => return Err(ForgeError::InvalidArnTemplate(s.to_string())),
            }

            let mut name = String::new();
            loop {
                match i.next() {
                    Some('}') => break,
                    Some(c) => name.push(c),
                    None => return Err(ForgeError::InvalidArnTemplate(s.to_string())),
                }
            }

            if name.is_empty() {
                return Err(ForgeError::InvalidArnTemplate(s.to_string()));
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(name));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            template: s.to_string(),
            segments,
        })
    }
}

impl Display for ArnTemplate {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.template)
    }
}
