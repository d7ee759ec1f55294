//! Parse a document and print it back in both emit modes.

use flatjson::{parse, AllocationStrategy};

fn main() {
    let text = r#"{
        "name": "flatjson",
        "features": ["single-buffer", "in-place strings", 3],
        "strict": true
    }"#;

    let doc = parse(AllocationStrategy::Single, text);
    if !doc.is_valid() {
        eprintln!(
            "parse failed at {}:{}: {}",
            doc.error_line(),
            doc.error_column(),
            doc.error_message()
        );
        return;
    }

    let root = doc.root().unwrap();
    println!("compact: {}", flatjson::to_string(&root));
    println!("pretty:\n{}", flatjson::to_string_pretty(&root));
}
