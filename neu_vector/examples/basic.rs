use neu_vector::{ArrayError, NeuVector};

fn main() -> Result<(), ArrayError> {
    println!("--- Basic Usage Example ---");
    let mut arr = NeuVector::with_capacity(1)?;

    for i in 1..=5 {
        arr.append(i * 10)?;
        println!("Appended: {}, len: {}, cap: {}", i * 10, arr.len(), arr.capacity());
    }

    println!("{}", arr.print_string());
    println!("find(30) = {}", arr.find(&30));
    println!("find(31) = {}", arr.find(&31));

    match arr.get(arr.len()) {
        Ok(value) => println!("unexpected value {value}"),
        Err(e) => println!("get past the end: {e}"),
    }

    while let Ok(val) = arr.pop() {
        println!("Popped: {}, len: {}", val, arr.len());
    }

    arr.release();
    Ok(())
}
