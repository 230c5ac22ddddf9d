use serde_json::{Value, json};

/// The shared document most filter tests run against, written with single quotes.
pub const DOCUMENT: &str = "{\
    'a': 'hello', \
    'b': [1,2,3],  \
    'c': {'d': ['e', 'f', 'g']},\
    'h': {'i': 'j'},\
    'k': {'l':'m', 'n':'o'}, \
    'aBLAH123-foo::$$': 'weird' ,\
    'aA123': 'mixed'}";

/// A small document with nested arrays and objects.
pub fn nested_document() -> Value {
    json!({
        "a": "hello",
        "b": { "c": ["d", "e", "f"] },
        "g": [1, 2, { "h": "i" }]
    })
}
