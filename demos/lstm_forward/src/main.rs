// Demo: one LSTM forward pass over a random input sequence
//
// Wires the sizes together, allocates the whole state trajectory once,
// runs the recurrence, and prints each per-step output tensor. The
// step loop itself performs no heap allocation; everything it writes
// into was allocated by Lstm::new.

use tenrec_core::{Result, Tensor};
use tenrec_nn::Lstm;

fn main() -> Result<()> {
    let sequence_length = 15;
    let input_size = 32;
    let hidden_size = 25;
    let output_size = sequence_length;

    let mut lstm = Lstm::new(input_size, hidden_size, output_size, sequence_length)?;
    let input = Tensor::rand(&[sequence_length, input_size])?;

    let outputs = lstm.forward(&input)?;
    for out in outputs {
        println!("{out}");
    }

    Ok(())
}
