use burn::{
    nn::{
        gru::{Gru, GruConfig},
        loss::CrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::relu,
};
use serde::{Deserialize, Serialize};

use crate::data::vocabulary::PAD_ID;

/// Which encoder sits in front of the shared per-position head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelVariant {
    /// One forward GRU over the raw ids, fed as a single float feature
    Simple,
    /// Forward + time-reversed GRU over the raw ids
    Bidirectional,
    /// Learned embedding of the ids feeding the bidirectional GRU
    EmbedBidirectional,
}

impl ModelVariant {
    pub fn is_bidirectional(self) -> bool {
        !matches!(self, ModelVariant::Simple)
    }

    pub fn has_embedding(self) -> bool {
        matches!(self, ModelVariant::EmbedBidirectional)
    }
}

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct Seq2SeqConfig {
    pub variant:       ModelVariant,
    /// Rows in the source embedding (source vocab size + pad)
    pub input_vocab:   usize,
    /// Output classes (target vocab size + pad)
    pub num_classes:   usize,
    #[config(default = 256)]
    pub hidden_size:   usize,
    #[config(default = 1024)]
    pub dense_size:    usize,
    #[config(default = 256)]
    pub embedding_dim: usize,
    #[config(default = 0.5)]
    pub dropout:       f64,
}

impl Seq2SeqConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Seq2SeqModel<B> {
        let embedding = self.variant.has_embedding()
            .then(|| EmbeddingConfig::new(self.input_vocab, self.embedding_dim).init(device));
        let d_input = if embedding.is_some() { self.embedding_dim } else { 1 };

        let forward_rnn  = GruConfig::new(d_input, self.hidden_size, true).init(device);
        let backward_rnn = self.variant.is_bidirectional()
            .then(|| GruConfig::new(d_input, self.hidden_size, true).init(device));
        let directions = if backward_rnn.is_some() { 2 } else { 1 };

        let dense      = LinearConfig::new(self.hidden_size * directions, self.dense_size).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        let classifier = LinearConfig::new(self.dense_size, self.num_classes).init(device);

        Seq2SeqModel { embedding, forward_rnn, backward_rnn, dense, dropout, classifier }
    }
}

#[derive(Module, Debug)]
pub struct Seq2SeqModel<B: Backend> {
    pub embedding:    Option<Embedding<B>>,
    pub forward_rnn:  Gru<B>,
    pub backward_rnn: Option<Gru<B>>,
    pub dense:        Linear<B>,
    pub dropout:      Dropout,
    pub classifier:   Linear<B>,
}

impl<B: Backend> Seq2SeqModel<B> {
    /// input_ids: [batch, seq_len] → logits: [batch, seq_len, num_classes]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let x = match &self.embedding {
            Some(embedding) => embedding.forward(input_ids),
            // Without an embedding each id is one float feature per step.
            None => input_ids.float().unsqueeze_dim::<3>(2),
        };

        let forward_states = self.forward_rnn.forward(x.clone(), None);
        let states = match &self.backward_rnn {
            Some(rnn) => {
                // Run over the reversed sequence, then flip back so
                // step t of both directions lines up.
                let backward_states = rnn.forward(x.flip([1]), None).flip([1]);
                Tensor::cat(vec![forward_states, backward_states], 2)
            }
            None => forward_states,
        };

        let hidden = relu(self.dense.forward(states));
        self.classifier.forward(self.dropout.forward(hidden))
    }

    /// Mean per-position cross entropy. With `mask_padding` the
    /// positions labelled with the pad class do not contribute.
    pub fn forward_loss(
        &self,
        input_ids:    Tensor<B, 2, Int>,
        target_ids:   Tensor<B, 2, Int>,
        mask_padding: bool,
    ) -> (Tensor<B, 1>, Tensor<B, 3>) {
        let logits = self.forward(input_ids);
        let [batch_size, seq_len, num_classes] = logits.dims();

        let pad_tokens = mask_padding.then(|| vec![PAD_ID as usize]);
        let ce = CrossEntropyLossConfig::new()
            .with_pad_tokens(pad_tokens)
            .init(&logits.device());

        let loss = ce.forward(
            logits.clone().reshape([batch_size * seq_len, num_classes]),
            target_ids.reshape([batch_size * seq_len]),
        );
        (loss, logits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn ids(device: &<TestBackend as Backend>::Device) -> Tensor<TestBackend, 2, Int> {
        Tensor::<TestBackend, 1, Int>::from_ints([1, 2, 0, 3, 0, 0], device).reshape([2, 3])
    }

    fn small(variant: ModelVariant) -> Seq2SeqConfig {
        Seq2SeqConfig::new(variant, 4, 6)
            .with_hidden_size(8)
            .with_dense_size(16)
            .with_embedding_dim(5)
    }

    #[test]
    fn test_every_variant_emits_one_distribution_per_step() {
        let device = Default::default();
        for variant in [ModelVariant::Simple, ModelVariant::Bidirectional, ModelVariant::EmbedBidirectional] {
            let model: Seq2SeqModel<TestBackend> = small(variant).init(&device);
            assert_eq!(model.forward(ids(&device)).dims(), [2, 3, 6], "{variant:?}");
        }
    }

    #[test]
    fn test_variant_layers() {
        let device = Default::default();
        let simple: Seq2SeqModel<TestBackend> = small(ModelVariant::Simple).init(&device);
        assert!(simple.embedding.is_none() && simple.backward_rnn.is_none());

        let embed: Seq2SeqModel<TestBackend> = small(ModelVariant::EmbedBidirectional).init(&device);
        assert!(embed.embedding.is_some() && embed.backward_rnn.is_some());
    }

    #[test]
    fn test_loss_is_finite_scalar() {
        let device = Default::default();
        let model: Seq2SeqModel<TestBackend> = small(ModelVariant::Bidirectional).init(&device);
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([1, 5, 0, 2, 0, 0], &device)
            .reshape([2, 3]);

        for mask in [false, true] {
            let (loss, _) = model.forward_loss(ids(&device), targets.clone(), mask);
            let value: f64 = loss.into_scalar().elem::<f64>();
            assert!(value.is_finite() && value > 0.0);
        }
    }

    #[test]
    fn test_variant_serialises_kebab_case() {
        let json = serde_json::to_string(&ModelVariant::EmbedBidirectional).unwrap();
        assert_eq!(json, "\"embed-bidirectional\"");
    }
}
