//! Pipeline stages for the analysis.
//!
//! Each stage of the analysis consumes the output of the previous one, so stages are
//! expressed as [Pass] implementations and fused with [Pass::chain].

/// A single stage of the analysis pipeline.
///
/// A pass takes ownership of its input and produces either the same type or a new one.
/// Recoverable problems should be reported through a diagnostics handler, `Err` is reserved
/// for failures that make the rest of the pipeline meaningless.
pub trait Pass {
    type Input;
    type Output;
    type Error;

    /// A short name used when tracing the pipeline
    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Runs the pass on the given input
    fn run(&mut self, input: Self::Input) -> Result<Self::Output, Self::Error>;

    /// Chains two passes together, feeding the output of `self` into `pass`
    fn chain<P>(self, pass: P) -> Chain<Self, P>
    where
        Self: Sized,
        P: Pass<Input = Self::Output>,
        P::Error: From<Self::Error>,
    {
        Chain::new(self, pass)
    }
}
impl<P: Pass + ?Sized> Pass for &mut P {
    type Input = P::Input;
    type Output = P::Output;
    type Error = P::Error;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn run(&mut self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        (**self).run(input)
    }
}
impl<P: Pass + ?Sized> Pass for Box<P> {
    type Input = P::Input;
    type Output = P::Output;
    type Error = P::Error;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn run(&mut self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        (**self).run(input)
    }
}

/// Two passes fused into one, produced by [Pass::chain].
///
/// `Chain` is itself a [Pass], so any number of stages can be fused into a single unit.
pub struct Chain<A, B> {
    a: A,
    b: B,
}
impl<A, B> Chain<A, B> {
    fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}
impl<A: Clone, B: Clone> Clone for Chain<A, B> {
    #[inline]
    fn clone(&self) -> Self {
        Self::new(self.a.clone(), self.b.clone())
    }
}
impl<A, B> Pass for Chain<A, B>
where
    A: Pass,
    B: Pass<Input = A::Output>,
    B::Error: From<A::Error>,
{
    type Input = A::Input;
    type Output = B::Output;
    type Error = B::Error;

    fn name(&self) -> &'static str {
        self.b.name()
    }

    fn run(&mut self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        let intermediate = self.a.run(input)?;
        self.b.run(intermediate)
    }
}
