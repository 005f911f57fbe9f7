use std::sync::Arc;

use tracing::debug;

use crate::nlp::entities::recognize;
use crate::nlp::lexicon::Lexicon;
use crate::nlp::tagger::tag;
use crate::nlp::tokenizer::tokenize;
use crate::nlp::{Annotator, Document, Token};

/// Default annotator: tokenizer → tagger → gazetteer entity recognizer.
///
/// The lexicon is shared read-only, so clones are cheap.
#[derive(Debug, Clone)]
pub struct RuleBasedAnnotator {
    lexicon: Arc<Lexicon>,
}

impl RuleBasedAnnotator {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
        }
    }
}

impl Annotator for RuleBasedAnnotator {
    fn annotate(&self, text: &str) -> Document {
        let tokens: Vec<Token> = tokenize(text)
            .into_iter()
            .map(|span| Token::new(span.text, tag(span.text, &self.lexicon), span.offset))
            .collect();
        let entities = recognize(&tokens, text, &self.lexicon);

        debug!(
            tokens = tokens.len(),
            entities = entities.len(),
            "Annotated document"
        );

        Document { tokens, entities }
    }
}
