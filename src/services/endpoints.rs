//! Endpoint operations
//!
//! Every operation validates its options, applies defaults, then hands a
//! payload to [`Engine::execute`] under the endpoint's fixed encoding.

use crate::models::*;
use crate::services::context::RequestContext;
use crate::services::encoder::{Encoding, Payload};
use crate::services::engine::{Endpoint, Engine};
use crate::services::validation::validate;
use crate::utils::error::EngineResult;
use reqwest::Method;

pub const COMPLETIONS: Endpoint = Endpoint {
    method: Method::POST,
    path: "/completions",
    encoding: Encoding::Json,
};

pub const EDITS: Endpoint = Endpoint {
    method: Method::POST,
    path: "/edits",
    encoding: Encoding::Json,
};

pub const IMAGE_GENERATIONS: Endpoint = Endpoint {
    method: Method::POST,
    path: "/images/generations",
    encoding: Encoding::Json,
};

pub const IMAGE_EDITS: Endpoint = Endpoint {
    method: Method::POST,
    path: "/images/edits",
    encoding: Encoding::UrlEncodedForm,
};

pub const IMAGE_VARIATIONS: Endpoint = Endpoint {
    method: Method::POST,
    path: "/images/variations",
    encoding: Encoding::UrlEncodedForm,
};

pub const AUDIO_TRANSCRIPTIONS: Endpoint = Endpoint {
    method: Method::POST,
    path: "/audio/transcriptions",
    encoding: Encoding::Multipart,
};

pub const AUDIO_TRANSLATIONS: Endpoint = Endpoint {
    method: Method::POST,
    path: "/audio/translations",
    encoding: Encoding::Multipart,
};

pub const MODERATIONS: Endpoint = Endpoint {
    method: Method::POST,
    path: "/moderations",
    encoding: Encoding::Json,
};

pub const MODELS: Endpoint = Endpoint {
    method: Method::GET,
    path: "/models",
    encoding: Encoding::Empty,
};

impl Engine {
    /// Create a completion for the provided prompts
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/completions/create
    pub async fn completion(
        &self,
        ctx: &RequestContext,
        options: CompletionOptions,
    ) -> EngineResult<CompletionResponse> {
        validate(&options)?;
        let options = options.with_defaults();
        self.execute(ctx, &COMPLETIONS, None, Payload::json(&options)?).await
    }

    /// Create an edited version of the input following an instruction
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/edits/create
    pub async fn edit(&self, ctx: &RequestContext, options: EditOptions) -> EngineResult<EditResponse> {
        validate(&options)?;
        self.execute(ctx, &EDITS, None, Payload::json(&options)?).await
    }

    /// Create images from a prompt
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/images/create
    pub async fn image_create(
        &self,
        ctx: &RequestContext,
        options: ImageCreateOptions,
    ) -> EngineResult<ImageResponse> {
        validate(&options)?;
        let options = options.with_defaults();
        self.execute(ctx, &IMAGE_GENERATIONS, None, Payload::json(&options)?).await
    }

    /// Edit an image from a prompt and optional mask
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/images/create-edit
    pub async fn image_edit(
        &self,
        ctx: &RequestContext,
        options: ImageEditOptions,
    ) -> EngineResult<ImageResponse> {
        validate(&options)?;
        let fields = options.with_defaults().into_fields();
        self.execute(ctx, &IMAGE_EDITS, None, Payload::Fields(fields)).await
    }

    /// Create variations of an image
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/images/create-variation
    pub async fn image_variation(
        &self,
        ctx: &RequestContext,
        options: ImageVariationOptions,
    ) -> EngineResult<ImageResponse> {
        validate(&options)?;
        let fields = options.with_defaults().into_fields();
        self.execute(ctx, &IMAGE_VARIATIONS, None, Payload::Fields(fields)).await
    }

    /// Transcribe audio into the input language
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/audio/create
    pub async fn transcribe(
        &self,
        ctx: &RequestContext,
        options: TranscribeOptions,
    ) -> EngineResult<TranscribeResponse> {
        validate(&options)?;
        let options = TranscribeOptions {
            audio: options.audio.with_defaults(),
            language: options.language,
        };
        self.execute(ctx, &AUDIO_TRANSCRIPTIONS, None, Payload::Fields(options.into_fields()))
            .await
    }

    /// Translate audio into English
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/audio/create
    pub async fn translate(
        &self,
        ctx: &RequestContext,
        options: TranslateOptions,
    ) -> EngineResult<TranslateResponse> {
        validate(&options)?;
        let options = TranslateOptions::new(options.audio.with_defaults());
        self.execute(ctx, &AUDIO_TRANSLATIONS, None, Payload::Fields(options.into_fields()))
            .await
    }

    /// Classify whether text violates the content policy
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/moderations/create
    pub async fn moderate(
        &self,
        ctx: &RequestContext,
        options: ModerationOptions,
    ) -> EngineResult<ModerationResponse> {
        validate(&options)?;
        self.execute(ctx, &MODERATIONS, None, Payload::json(&options)?).await
    }

    /// List the currently available models
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/models/list
    pub async fn list_models(&self, ctx: &RequestContext) -> EngineResult<ListModelsResponse> {
        self.execute(ctx, &MODELS, None, Payload::Empty).await
    }

    /// Retrieve one model's owner and permissions
    ///
    /// Docs: https://platform.openai.com/docs/api-reference/models/retrieve
    pub async fn retrieve_model(
        &self,
        ctx: &RequestContext,
        options: RetrieveModelOptions,
    ) -> EngineResult<ModelInfo> {
        validate(&options)?;
        self.execute(ctx, &MODELS, Some(options.id.as_str()), Payload::Empty).await
    }
}
