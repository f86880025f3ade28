// Lstm — Long Short-Term Memory forward pass, allocation-free per step
//
// The LSTM uses four gates (forget, input, candidate, output) to carry
// a cell state across time steps:
//
//   z_t = [h_t ; x_t]                     (concat, hidden on top)
//   f_t = sigmoid(W_f @ z_t)   — forget gate: how much old state to keep
//   i_t = sigmoid(W_i @ z_t)   — input gate:  how much new info to let in
//   g_t = tanh(W_c @ z_t)      — candidate:   values to add
//   o_t = sigmoid(W_o @ z_t)   — output gate: how much state to expose
//   c_{t+1} = f_t * c_t + i_t * g_t
//   h_{t+1} = o_t * tanh(c_{t+1})
//   y_t = W_y @ h_{t+1}
//
// Every tensor the recurrence touches is allocated once, up front: the
// hidden/cell trajectories (sequence_length + 1 entries, index 0 the
// zero boundary condition), one concat buffer and four gate tensors per
// step, and one output per step. The step loop only performs in-place
// writes into those tensors, so forward() does zero per-step heap
// allocation. cell_states[t] is reused as scratch for the forget
// product; it is never read again once step t completes, and since the
// scratch write is x * 0 at the boundary, re-running forward on the
// same module reproduces the same outputs.

use tenrec_core::error::{Error, Result};
use tenrec_core::shape::Shape;
use tenrec_core::tensor::Tensor;

/// An LSTM forward module with a fully pre-allocated state trajectory.
///
/// # Shapes
/// - gate weights `W_f/W_i/W_c/W_o`: `[hidden_size, input_size + hidden_size]`
/// - projection `W_y`: `[output_size, hidden_size]`
/// - input matrix: `[sequence_length, input_size]`
/// - hidden/cell states and gates: `[hidden_size, 1]` per step
/// - outputs: `[output_size, 1]` per step
#[derive(Debug)]
pub struct Lstm {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub sequence_length: usize,

    w_forget: Tensor,
    w_input: Tensor,
    w_candidate: Tensor,
    w_output: Tensor,
    w_project: Tensor,

    // index 0 is the zero-initialized boundary condition
    hidden_states: Vec<Tensor>,
    cell_states: Vec<Tensor>,

    concat_inputs: Vec<Tensor>,
    forget_gates: Vec<Tensor>,
    input_gates: Vec<Tensor>,
    candidate_gates: Vec<Tensor>,
    output_gates: Vec<Tensor>,
    outputs: Vec<Tensor>,
}

fn tensor_seq(count: usize, dims: &[usize]) -> Result<Vec<Tensor>> {
    (0..count).map(|_| Tensor::new(dims)).collect()
}

impl Lstm {
    /// Create an LSTM with random uniform weights in [-1, 1) and every
    /// per-step tensor pre-allocated.
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        sequence_length: usize,
    ) -> Result<Self> {
        let concat_size = input_size + hidden_size;
        Self::from_weights(
            Tensor::rand(&[hidden_size, concat_size])?,
            Tensor::rand(&[hidden_size, concat_size])?,
            Tensor::rand(&[hidden_size, concat_size])?,
            Tensor::rand(&[hidden_size, concat_size])?,
            Tensor::rand(&[output_size, hidden_size])?,
            sequence_length,
        )
    }

    /// Create an LSTM from directly supplied weights.
    ///
    /// Sizes are derived from the weight shapes: the gate weights must
    /// all share the shape `[hidden, input + hidden]` and the
    /// projection must be `[output, hidden]`.
    pub fn from_weights(
        w_forget: Tensor,
        w_input: Tensor,
        w_candidate: Tensor,
        w_output: Tensor,
        w_project: Tensor,
        sequence_length: usize,
    ) -> Result<Self> {
        let hidden_size = w_forget.rows();
        let concat_size = w_forget.cols();
        if concat_size <= hidden_size {
            return Err(Error::msg(format!(
                "gate weight shape {} leaves no room for the input: \
                 columns must exceed the hidden size",
                w_forget.shape()
            )));
        }
        let input_size = concat_size - hidden_size;
        for w in [&w_input, &w_candidate, &w_output] {
            if w.shape() != w_forget.shape() {
                return Err(Error::ShapeMismatch {
                    expected: w_forget.shape().clone(),
                    got: w.shape().clone(),
                });
            }
        }
        if w_project.cols() != hidden_size {
            return Err(Error::ShapeMismatch {
                expected: Shape::new(&[w_project.rows(), hidden_size])?,
                got: w_project.shape().clone(),
            });
        }
        let output_size = w_project.rows();

        let state_dims = [hidden_size, 1];
        Ok(Lstm {
            input_size,
            hidden_size,
            output_size,
            sequence_length,
            w_forget,
            w_input,
            w_candidate,
            w_output,
            w_project,
            hidden_states: tensor_seq(sequence_length + 1, &state_dims)?,
            cell_states: tensor_seq(sequence_length + 1, &state_dims)?,
            concat_inputs: tensor_seq(sequence_length, &[concat_size, 1])?,
            forget_gates: tensor_seq(sequence_length, &state_dims)?,
            input_gates: tensor_seq(sequence_length, &state_dims)?,
            candidate_gates: tensor_seq(sequence_length, &state_dims)?,
            output_gates: tensor_seq(sequence_length, &state_dims)?,
            outputs: tensor_seq(sequence_length, &[output_size, 1])?,
        })
    }

    /// Run the forward pass over `input` of shape
    /// `[sequence_length, input_size]`, returning one `[output_size, 1]`
    /// tensor per step.
    ///
    /// Every step mutates the module's pre-allocated tensors in place;
    /// re-running with the same input and weights reproduces the same
    /// outputs.
    pub fn forward(&mut self, input: &Tensor) -> Result<&[Tensor]> {
        if input.rows() != self.sequence_length || input.cols() != self.input_size {
            return Err(Error::ShapeMismatch {
                expected: Shape::new(&[self.sequence_length, self.input_size])?,
                got: input.shape().clone(),
            });
        }

        for t in 0..self.sequence_length {
            // Zero-copy view of this step's input column.
            let x_t = input.row(t)?;
            self.concat_inputs[t].concat_from(&self.hidden_states[t], &x_t)?;

            self.forget_gates[t].matmul_from(&self.w_forget, &self.concat_inputs[t])?;
            self.forget_gates[t].sigmoid_()?;

            self.input_gates[t].matmul_from(&self.w_input, &self.concat_inputs[t])?;
            self.input_gates[t].sigmoid_()?;

            self.candidate_gates[t].matmul_from(&self.w_candidate, &self.concat_inputs[t])?;
            self.candidate_gates[t].tanh_()?;

            self.output_gates[t].matmul_from(&self.w_output, &self.concat_inputs[t])?;
            self.output_gates[t].sigmoid_()?;

            // c_{t+1} = f * c_t + i * g. The forget product lands in
            // cell_states[t] (scratch; not read again after this step).
            self.cell_states[t].mul_from(&self.forget_gates[t], &self.cell_states[t])?;
            self.cell_states[t + 1].mul_from(&self.input_gates[t], &self.candidate_gates[t])?;
            self.cell_states[t + 1].add_from(&self.cell_states[t + 1], &self.cell_states[t])?;

            // h_{t+1} = o * tanh(c_{t+1}). tanh_from keeps the cell
            // state intact for step t+1.
            self.hidden_states[t + 1].tanh_from(&self.cell_states[t + 1])?;
            self.hidden_states[t + 1].mul_from(&self.output_gates[t], &self.hidden_states[t + 1])?;

            self.outputs[t].matmul_from(&self.w_project, &self.hidden_states[t + 1])?;
        }

        Ok(&self.outputs)
    }

    /// The per-step outputs of the most recent forward pass.
    pub fn outputs(&self) -> &[Tensor] {
        &self.outputs
    }

    /// Hidden state trajectory, index 0 the boundary condition.
    pub fn hidden_states(&self) -> &[Tensor] {
        &self.hidden_states
    }

    /// Cell state trajectory, index 0 the boundary condition. Entries
    /// other than the last hold the forget-product scratch value after
    /// a forward pass.
    pub fn cell_states(&self) -> &[Tensor] {
        &self.cell_states
    }

    /// Concat buffers `[h_t ; x_t]` of the most recent forward pass.
    pub fn concat_inputs(&self) -> &[Tensor] {
        &self.concat_inputs
    }

    /// The five weight matrices, in (forget, input, candidate, output,
    /// projection) order.
    pub fn weights(&self) -> [&Tensor; 5] {
        [
            &self.w_forget,
            &self.w_input,
            &self.w_candidate,
            &self.w_output,
            &self.w_project,
        ]
    }
}
