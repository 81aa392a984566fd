//! Example: Parse JSON to a document tree and navigate it.
//!
//! Run with: cargo run --example tree_parse

use rvjson_core::{Document, ValueRef};

fn main() {
    let input = br#"{
    "title" : "Recursive descent",
    "year" : 2024,
    "draft" : false,
    "authors" : [
        {"name" : "Roman", "email" : null},
        {"name" : "Guest \"reviewer\"", "email" : "guest@example.com"}
    ],
    "metrics" : {"pages" : 12, "ratio" : 6.02e-1}
}"#;

    let doc = Document::parse(input).expect("parse failed");

    println!("=== Document Tree ===\n");
    for (name, value) in doc.root().members() {
        print_value(&String::from_utf8_lossy(name), value, 0);
    }

    println!("\n=== Lookups ===\n");
    let root = doc.root();
    if let Some(title) = root.get("title").and_then(|v| v.as_str()) {
        println!("title: {}", title);
    }
    if let Some(authors) = root.get("authors").and_then(|v| v.as_array()) {
        for author in authors.iter().filter_map(|a| a.as_object()) {
            let name = author.get("name").and_then(|v| v.as_str()).unwrap_or("?");
            let email = author.get("email").and_then(|v| v.as_str());
            println!("author: {} <{}>", name, email.unwrap_or("none"));
        }
    }

    println!(
        "\n{} objects, {} arrays, {} strings",
        doc.object_count(),
        doc.array_count(),
        doc.string_count()
    );

    println!("\n=== Duplicate key ===\n");
    match Document::parse(br#"{"a" : 1, "a" : 2}"#) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(err) => println!("rejected: {}", err),
    }
}

fn print_value(name: &str, value: ValueRef<'_, '_>, depth: usize) {
    let indent = "  ".repeat(depth);

    if let Some(array) = value.as_array() {
        println!("{}{}: [{} items]", indent, name, array.len());
        for (i, item) in array.iter().enumerate() {
            print_value(&format!("[{}]", i), item, depth + 1);
        }
    } else if let Some(object) = value.as_object() {
        println!("{}{}: {{{} members}}", indent, name, object.len());
        for (member, item) in object.members() {
            print_value(&String::from_utf8_lossy(member), item, depth + 1);
        }
    } else {
        println!("{}{}: {:?}", indent, name, value);
    }
}
