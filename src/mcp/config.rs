use std::collections::HashMap;

/// How to launch an MCP server that speaks over stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpServerConfig {
    /// Label used in logs and messages
    pub name: String,
    pub command: String,
    pub args: Vec<String>,
    /// Extra environment for the child, on top of the inherited one
    pub env: HashMap<String, String>,
}

impl McpServerConfig {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// The BrightData scraping server, run through `npx`.
    ///
    /// The server reads its credential from `API_TOKEN`.
    pub fn bright_data(api_token: Option<String>) -> Self {
        let config = Self::new("bright_data", "npx").arg("@brightdata/mcp");
        match api_token {
            Some(token) => config.env("API_TOKEN", token),
            None => config,
        }
    }

    /// Human readable command line, for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
