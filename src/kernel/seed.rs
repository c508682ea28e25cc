//! Starter project shown in a fresh workspace.

use crate::models::{FileTree, FileTreeError};

const README: &str = "# Arcode Project\n\nWelcome to Arcode!\n\nThis is a sample README.md file. You can edit it and see changes reflected in the editor.\n\n## Features\n\n- VS Code like UI\n- File Explorer\n- Monaco Editor\n- AI Assistant\n- Chat Panel (placeholder)\n- Terminal (placeholder)";

const APP_JS: &str = "import React from \"react\";\n\nfunction App() {\n  return (\n    <div>\n      <h1>Hello, Arcode!</h1>\n      <p>This is a sample JavaScript file.</p>\n    </div>\n  );\n}\n\nexport default App;\n";

const MAIN_CSS: &str = "body {\n  font-family: Arial, Helvetica, sans-serif;\n  margin: 0;\n  padding: 0;\n  background-color: hsl(var(--background));\n  color: hsl(var(--foreground));\n}\n\nh1 {\n  color: hsl(var(--primary));\n}";

const PACKAGE_JSON: &str = "{\n  \"name\": \"arcode-project\",\n  \"version\": \"1.0.0\",\n  \"description\": \"A sample project for Arcode IDE\",\n  \"main\": \"src/app.js\",\n  \"scripts\": {\n    \"start\": \"echo \\\"Starting project...\\\" \"\n  },\n  \"keywords\": [\"arcode\", \"ide\", \"sample\"],\n  \"author\": \"Arcode Team\",\n  \"license\": \"MIT\"\n}";

const EXAMPLE_PY: &str = "# This is a sample Python file.\ndef greet(name):\n    print(f\"Hello, {name}!\")\n\nif __name__ == \"__main__\":\n    greet(\"Arcode User\")\n";

pub fn sample_project() -> Result<FileTree, FileTreeError> {
    let mut tree = FileTree::new();
    let root = tree.root();

    tree.insert_file(root, "README.md", README)?;
    let src = tree.insert_folder(root, "src")?;
    tree.insert_file(src, "app.js", APP_JS)?;
    let styles = tree.insert_folder(src, "styles")?;
    tree.insert_file(styles, "main.css", MAIN_CSS)?;
    tree.insert_file(root, "package.json", PACKAGE_JSON)?;
    tree.insert_file(root, "example.py", EXAMPLE_PY)?;

    Ok(tree)
}
