mod page;

pub use page::{demo_page, load_page, parse_markdown_page, parse_toml_page};
