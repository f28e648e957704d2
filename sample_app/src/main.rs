use anyhow::{Context, Result};
use neu_vector::NeuVector;

fn main() -> Result<()> {
    println!("Creating vector with capacity 2...");
    let mut vector = NeuVector::with_capacity(2).context("create_vector failed")?;

    for value in [10, 20, 30] {
        vector.append(value)?;
        println!(
            "append({value}) -> {} (size {}, capacity {})",
            vector.to_debug_string(),
            vector.len(),
            vector.capacity()
        );
    }
    assert_eq!(vector.capacity(), 4);

    vector.insert(1, 99)?;
    println!("insert(1, 99) -> {}", vector.to_debug_string());
    assert_eq!(vector.as_slice(), &[10, 99, 20, 30]);

    let removed = vector.remove(0)?;
    println!("remove(0) returned {removed}");
    assert_eq!(removed, 10);

    println!("find(20) = {}", vector.find(&20));
    println!("find(10) = {}", vector.find(&10));

    match vector.get(vector.len()) {
        Ok(value) => println!("get past the end returned {value}?"),
        Err(e) => println!("get({}) rejected: {e}", vector.len()),
    }

    println!("{}", vector.print_string());
    assert_eq!(vector.to_debug_string(), "[99, 20, 30]");

    vector.release();
    println!("Vector released.");
    Ok(())
}
