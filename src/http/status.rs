/// HTTP [Status Code][rfc].
///
/// Any value in `100..=999` is a valid status code, only some of them carry a canonical reason
/// phrase, see [`describe`].
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#name-status-codes>
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusCode(u16);

impl Default for StatusCode {
    #[inline]
    fn default() -> Self {
        Self::OK
    }
}

impl StatusCode {
    /// Create status code from integer.
    ///
    /// Returns `None` if `code` is outside `100..=999`.
    #[inline]
    pub const fn new(code: u16) -> Option<Self> {
        match code {
            100..=999 => Some(Self(code)),
            _ => None,
        }
    }

    /// Returns status code value, e.g: `200`.
    #[inline]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns the canonical reason phrase, or an empty string if there is none.
    #[inline]
    pub const fn reason(&self) -> &'static str {
        describe(self.0)
    }

    /// Returns `true` if the status code semantics forbid a message body.
    ///
    /// These are `100`, `101`, `204`, `205` and `304`.
    #[inline]
    pub const fn is_bodyless(&self) -> bool {
        matches!(self.0, 100 | 101 | 204 | 205 | 304)
    }
}

macro_rules! status_code {
    (
        $(
            $(#[$doc:meta])*
            $int:literal $id:ident $msg:literal;
        )*
    ) => {
        /// Returns the canonical reason phrase for given status code, e.g: `"Not Found"` for
        /// `404`.
        ///
        /// Returns an empty string for codes without a canonical phrase.
        pub const fn describe(code: u16) -> &'static str {
            match code {
                $(
                    $int => $msg,
                )*
                _ => "",
            }
        }

        impl StatusCode {
            $(
                $(#[$doc])*
                pub const $id: Self = Self($int);
            )*
        }
    };
}

status_code! {
    /// `100`. The client should continue the request or ignore the response if the request is
    /// already finished.
    100 CONTINUE "Continue";
    /// `101`, This code is sent in response to an `Upgrade` request header from the client and
    /// indicates the protocol the server is switching to.
    101 SWITCHING_PROTOCOLS "Switching Protocols";
    /// `102`. The server has received and is processing the request, but no response is available
    /// yet.
    102 PROCESSING "Processing";
    /// `103`. Used with the `Link` header, letting the user agent start preloading resources.
    103 EARLY_HINTS "Early Hints";
    /// `200`. The request succeeded.
    200 OK "OK";
    /// `201`. The request succeeded, and a new resource was created as a result.
    201 CREATED "Created";
    /// `202`. The request has been received but not yet acted upon.
    202 ACCEPTED "Accepted";
    /// `203`. The returned metadata is not exactly the same as is available from the origin
    /// server.
    203 NON_AUTHORITATIVE_INFORMATION "Non-Authoritative Information";
    /// `204`. There is no content to send for this request, but the headers are useful.
    204 NO_CONTENT "No Content";
    /// `205`. Tells the user agent to reset the document which sent this request.
    205 RESET_CONTENT "Reset Content";
    /// `206`. Used when the `Range` header is sent from the client to request only part of a
    /// resource.
    206 PARTIAL_CONTENT "Partial Content";
    /// `207`. Conveys information about multiple resources (WebDAV).
    207 MULTI_STATUS "Multi-Status";
    /// `208`. Used inside a `<dav:propstat>` response element (WebDAV).
    208 ALREADY_REPORTED "Already Reported";
    /// `226`. The server has fulfilled a `GET` request with instance-manipulations applied.
    226 IM_USED "IM Used";
    /// `300`. The request has more than one possible response.
    300 MULTIPLE_CHOICES "Multiple Choices";
    /// `301`. The URL of the requested resource has been changed permanently.
    301 MOVED_PERMANENTLY "Moved Permanently";
    /// `302`. This response code means that the URI of requested resource has been changed
    /// temporarily.
    302 FOUND "Found";
    /// `303`. The server sent this response to direct the client to get the requested resource at
    /// another URI with a GET request.
    303 SEE_OTHER "See Other";
    /// `304`. This is used for caching purposes. It tells the client that the response has not
    /// been modified, so the client can continue to use the same cached version of the response.
    304 NOT_MODIFIED "Not Modified";
    /// `305`. Deprecated, the requested response must be accessed by a proxy.
    305 USE_PROXY "Use Proxy";
    /// `307`. The server sends this response to direct the client to get the requested resource
    /// at another URI with the same method that was used in the prior request.
    307 TEMPORARY_REDIRECT "Temporary Redirect";
    /// `308`. The resource is now permanently located at another URI.
    308 PERMANENT_REDIRECT "Permanent Redirect";
    /// `400`. The server cannot or will not process the request due to something that is
    /// perceived to be a client error.
    400 BAD_REQUEST "Bad Request";
    /// `401`. Although the HTTP standard specifies "unauthorized", semantically this response
    /// means "unauthenticated".
    401 UNAUTHORIZED "Unauthorized";
    /// `402`. Reserved for future use.
    402 PAYMENT_REQUIRED "Payment Required";
    /// `403`. The client's identity is known to the server, but client does not have access
    /// rights to the content.
    403 FORBIDDEN "Forbidden";
    /// `404`. The server cannot find the requested resource.
    404 NOT_FOUND "Not Found";
    /// `405`. The request method is known by the server but is not supported by the target
    /// resource.
    405 METHOD_NOT_ALLOWED "Method Not Allowed";
    /// `406`. The server doesn't find any content that conforms to the criteria given by the user
    /// agent.
    406 NOT_ACCEPTABLE "Not Acceptable";
    /// `407`. Authentication is needed to be done by a proxy.
    407 PROXY_AUTHENTICATION_REQUIRED "Proxy Authentication Required";
    /// `408`. The server would like to shut down this unused connection.
    408 REQUEST_TIMEOUT "Request Timeout";
    /// `409`. The request conflicts with the current state of the server.
    409 CONFLICT "Conflict";
    /// `410`. The requested content has been permanently deleted from server.
    410 GONE "Gone";
    /// `411`. Server rejected the request because the `Content-Length` header field is not
    /// defined and the server requires it.
    411 LENGTH_REQUIRED "Length Required";
    /// `412`. In conditional requests, the client has indicated preconditions in its headers
    /// which the server does not meet.
    412 PRECONDITION_FAILED "Precondition Failed";
    /// `413`. The request body is larger than limits defined by server.
    413 CONTENT_TOO_LARGE "Content Too Large";
    /// `414`. The URI requested by the client is longer than the server is willing to interpret.
    414 URI_TOO_LONG "URI Too Long";
    /// `415`. The media format of the requested data is not supported by the server.
    415 UNSUPPORTED_MEDIA_TYPE "Unsupported Media Type";
    /// `416`. The ranges specified by the `Range` header field in the request cannot be
    /// fulfilled.
    416 RANGE_NOT_SATISFIABLE "Range Not Satisfiable";
    /// `417`. The expectation indicated by the `Expect` request header field cannot be met by the
    /// server.
    417 EXPECTATION_FAILED "Expectation Failed";
    /// `418`. The server refuses the attempt to brew coffee with a teapot.
    418 IM_A_TEAPOT "I'm a teapot";
    /// `421`. The request was directed at a server that is not able to produce a response.
    421 MISDIRECTED_REQUEST "Misdirected Request";
    /// `422`. The request was well-formed but was unable to be followed due to semantic errors.
    422 UNPROCESSABLE_CONTENT "Unprocessable Content";
    /// `423`. The resource that is being accessed is locked (WebDAV).
    423 LOCKED "Locked";
    /// `424`. The request failed due to failure of a previous request (WebDAV).
    424 FAILED_DEPENDENCY "Failed Dependency";
    /// `425`. The server is unwilling to risk processing a request that might be replayed.
    425 TOO_EARLY "Too Early";
    /// `426`. The server refuses to perform the request using the current protocol.
    426 UPGRADE_REQUIRED "Upgrade Required";
    /// `428`. The origin server requires the request to be conditional.
    428 PRECONDITION_REQUIRED "Precondition Required";
    /// `429`. The user has sent too many requests in a given amount of time.
    429 TOO_MANY_REQUESTS "Too Many Requests";
    /// `431`. The server is unwilling to process the request because its header fields are too
    /// large.
    431 REQUEST_HEADER_FIELDS_TOO_LARGE "Request Header Fields Too Large";
    /// `451`. The user agent requested a resource that cannot legally be provided.
    451 UNAVAILABLE_FOR_LEGAL_REASONS "Unavailable For Legal Reasons";
    /// `500`. The server has encountered a situation it does not know how to handle.
    500 INTERNAL_SERVER_ERROR "Internal Server Error";
    /// `501`. The request method is not supported by the server and cannot be handled.
    501 NOT_IMPLEMENTED "Not Implemented";
    /// `502`. The server, while working as a gateway, got an invalid response.
    502 BAD_GATEWAY "Bad Gateway";
    /// `503`. The server is not ready to handle the request.
    503 SERVICE_UNAVAILABLE "Service Unavailable";
    /// `504`. The server is acting as a gateway and cannot get a response in time.
    504 GATEWAY_TIMEOUT "Gateway Timeout";
    /// `505`. The HTTP version used in the request is not supported by the server.
    505 HTTP_VERSION_NOT_SUPPORTED "HTTP Version Not Supported";
    /// `506`. The server has an internal configuration error in transparent content negotiation.
    506 VARIANT_ALSO_NEGOTIATES "Variant Also Negotiates";
    /// `507`. The server is unable to store the representation needed to complete the request
    /// (WebDAV).
    507 INSUFFICIENT_STORAGE "Insufficient Storage";
    /// `508`. The server detected an infinite loop while processing the request (WebDAV).
    508 LOOP_DETECTED "Loop Detected";
    /// `510`. Further extensions to the request are required for the server to fulfill it.
    510 NOT_EXTENDED "Not Extended";
    /// `511`. The client needs to authenticate to gain network access.
    511 NETWORK_AUTHENTICATION_REQUIRED "Network Authentication Required";
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason())
    }
}

impl std::fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("StatusCode").field(&self.0).finish()
    }
}

impl From<StatusCode> for u16 {
    #[inline]
    fn from(value: StatusCode) -> Self {
        value.0
    }
}
