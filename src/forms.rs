//! Repeatable candidate-input blocks
//!
//! Blocks get ids from a monotonically increasing counter. Removing a block
//! never reuses or decrements the counter, so ids are unique for the whole
//! session.

use crate::backend::types::CandidateInput;

/// Editable state of one candidate block.
#[derive(Debug, Clone, Default)]
pub struct CandidateForm {
    pub id: u32,
    pub candidate_id: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub cv_text: String,
}

impl CandidateForm {
    fn new(id: u32) -> Self {
        Self {
            id,
            candidate_id: placeholder_id(id),
            ..Self::default()
        }
    }

    pub fn to_input(&self) -> CandidateInput {
        CandidateInput {
            candidate_id: self.candidate_id.clone(),
            skills: self.skills.clone(),
            experience: self.experience.clone(),
            education: self.education.clone(),
            cv_text: self.cv_text.clone(),
        }
    }
}

/// Zero-padded placeholder id, `C007` for block 7.
pub fn placeholder_id(counter: u32) -> String {
    format!("C{:03}", counter)
}

/// The candidate blocks of the manual-input tab.
#[derive(Debug, Default)]
pub struct CandidateForms {
    blocks: Vec<CandidateForm>,
    counter: u32,
}

impl CandidateForms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new block labeled with the next counter value. Returns the
    /// id of the new block. Cannot fail; no upper bound on the count.
    pub fn add(&mut self) -> u32 {
        self.counter += 1;
        self.blocks.push(CandidateForm::new(self.counter));
        self.counter
    }

    /// Remove the block with the given id. Silent no-op if absent.
    pub fn remove(&mut self, id: u32) {
        self.blocks.retain(|block| block.id != id);
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut CandidateForm> {
        self.blocks.iter_mut().find(|block| block.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateForm> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Inputs for every block that has skills or CV text, in creation order.
    pub fn filled_inputs(&self) -> Vec<CandidateInput> {
        self.blocks
            .iter()
            .map(CandidateForm::to_input)
            .filter(CandidateInput::has_content)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut forms = CandidateForms::new();
        for _ in 0..4 {
            forms.add();
        }
        forms.remove(2);

        assert_eq!(forms.len(), 3);
        let ids: Vec<u32> = forms.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(forms.counter(), 4);

        // The next add continues from the high-water mark.
        assert_eq!(forms.add(), 5);
    }

    #[test]
    fn remove_of_unknown_id_is_a_no_op() {
        let mut forms = CandidateForms::new();
        forms.add();
        forms.remove(99);
        assert_eq!(forms.len(), 1);
    }

    #[test]
    fn placeholder_ids_are_zero_padded() {
        assert_eq!(placeholder_id(1), "C001");
        assert_eq!(placeholder_id(42), "C042");
        assert_eq!(placeholder_id(1000), "C1000");
    }

    #[test]
    fn new_block_prefills_candidate_id() {
        let mut forms = CandidateForms::new();
        forms.add();
        forms.add();
        let ids: Vec<&str> = forms.iter().map(|b| b.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["C001", "C002"]);
    }

    #[test]
    fn filled_inputs_drops_blocks_without_skills_or_cv() {
        let mut forms = CandidateForms::new();
        forms.add();
        forms.add();
        forms.add();
        forms.get_mut(1).unwrap().skills = "Python".to_string();
        forms.get_mut(3).unwrap().cv_text = "Ten years of Rust".to_string();

        let inputs = forms.filled_inputs();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].candidate_id, "C001");
        assert_eq!(inputs[1].candidate_id, "C003");
    }
}
