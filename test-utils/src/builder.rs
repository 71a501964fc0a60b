use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts.
///
/// Provides a fluent interface for configuring test environments backed by an
/// in-memory SQLite database. Call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let mut test = TestBuilder::new()
///     .with_session()
///     .build()
///     .await?;
/// let session = test.session().await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    /// Whether the session store table is created eagerly during `build()`.
    with_session: bool,
}

impl TestBuilder {
    /// Creates a new test builder with nothing initialized.
    ///
    /// # Returns
    /// - New `TestBuilder` instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares the session store during `build()` instead of on first access.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_session(mut self) -> Self {
        self.with_session = true;
        self
    }

    /// Builds and initializes the test context.
    ///
    /// Always connects the in-memory SQLite database; migrates the session store too
    /// when `with_session()` was requested.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context
    /// - `Err(TestError::Database)`- Failed to connect to database or create the session table
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.database().await?;
        if self.with_session {
            setup.session().await?;
        }

        Ok(setup)
    }
}
