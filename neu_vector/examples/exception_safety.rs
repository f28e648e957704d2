use neu_vector::NeuVector;

fn main() {
    println!("--- Failure Atomicity Example ---");
    let mut arr = NeuVector::from_slice(&[1, 2, 3]).expect("allocation failed");
    println!("before: {} (cap {})", arr.to_debug_string(), arr.capacity());

    if let Err(e) = arr.insert(10, 4) {
        println!("insert(10, 4) rejected: {e}");
    }
    if let Err(e) = arr.try_reserve(isize::MAX as usize) {
        println!("try_reserve(isize::MAX) rejected: {e}");
    }

    println!("after:  {} (cap {})", arr.to_debug_string(), arr.capacity());
    assert_eq!(arr.as_slice(), &[1, 2, 3]);
    assert_eq!(arr.capacity(), 3);
}
