/// Declares an `async fn` that returns a boxed, pinned, `Send` future so it
/// can be stored as an [`crate::AsyncTestFunc`] in a [`crate::TestSpec`].
///
/// The lifetime parameter ties every borrowed argument to the returned
/// future.
#[macro_export]
macro_rules! dyn_async {(
    $( #[$attr:meta] )*
    $pub:vis
    async
    fn $fname:ident<$lt:lifetime> ( $($args:tt)* ) $(-> $Ret:ty)?
    {
        $($body:tt)*
    }
) => (
    $( #[$attr] )*
    #[allow(unused_parens)]
    $pub
    fn $fname<$lt> ( $($args)* ) -> ::std::pin::Pin<::std::boxed::Box<
        dyn ::std::future::Future<Output = ($($Ret)?)>
            + ::std::marker::Send + $lt
    >>
    {
        ::std::boxed::Box::pin(async move { $($body)* })
    }
)}
