use std::fmt;

/// A command interpreted by the pipeline runner when printed on stdout,
/// e.g. `::error::Something went wrong`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCommand<'a> {
    command: &'a str,
    properties: Vec<(&'a str, &'a str)>,
    message: &'a str,
}

impl<'a> WorkflowCommand<'a> {
    pub fn new(command: &'a str, message: &'a str) -> Self {
        Self {
            command,
            properties: Vec::new(),
            message,
        }
    }

    pub fn with_property(mut self, key: &'a str, value: &'a str) -> Self {
        self.properties.push((key, value));
        self
    }

    /// Marks the step as failed with the given message.
    pub fn error(message: &'a str) -> Self {
        Self::new("error", message)
    }

    /// Saves `value` under `name` for the post invocation of the step.
    pub fn save_state(name: &'a str, value: &'a str) -> Self {
        Self::new("save-state", value).with_property("name", name)
    }

    /// Prints the command on stdout, where the runner picks it up.
    pub fn issue(&self) {
        println!("{self}");
    }
}

impl fmt::Display for WorkflowCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.command)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            let separator = if i == 0 { " " } else { "," };
            write!(f, "{separator}{key}={}", escape_property(value))?;
        }
        write!(f, "::{}", escape_data(self.message))
    }
}

fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
