//! Runs the filter from the crate documentation against a small document.
//!
//! ```text
//! cargo run --example readme
//! ```

use jjq::Filter;
use serde_json::json;

fn main() -> Result<(), jjq::JjqError> {
    let input = json!({
        "a": "hello",
        "b": { "c": ["d", "e", "f"] },
        "g": [1, 2, { "h": "i" }]
    });

    let filter = Filter::compile(r#".a , { "new-value": .b.c.[1] }, [( .g | .[2] | .h , .)]"#)?;
    println!("filter: {}", filter);

    // Prints:
    //   "hello"
    //   {"new-value":"e"}
    //   ["i",{"h":"i"}]
    for output in filter.apply(&input) {
        println!("{}", output);
    }
    Ok(())
}
