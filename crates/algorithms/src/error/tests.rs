use super::*;

#[test]
fn test_error_conversion() {
    let err = Error::param("p", "modulus must be odd");
    match CoreError::from(err) {
        CoreError::InvalidParameter { context, message } => {
            assert_eq!(context, "curve parameters");
            assert_eq!(message, "p: modulus must be odd");
        }
        other => panic!("Expected InvalidParameter error, got {:?}", other),
    }

    let err = Error::Length {
        context: "field element",
        expected: 32,
        actual: 16,
    };
    match CoreError::from(err) {
        CoreError::InvalidLength {
            context,
            expected,
            actual,
        } => {
            assert_eq!(context, "field element");
            assert_eq!(expected, 32);
            assert_eq!(actual, 16);
        }
        other => panic!("Expected InvalidLength error, got {:?}", other),
    }

    let err = Error::InvalidPoint {
        context: "decode",
        reason: "not on curve",
    };
    assert!(matches!(
        CoreError::from(err),
        CoreError::InvalidPublicKey { context: "decode", .. }
    ));

    let err = Error::NotInvertible { context: "scalar" };
    assert_eq!(
        CoreError::from(err),
        CoreError::NotInvertible { context: "scalar" }
    );
}

#[test]
fn test_validation_functions() {
    assert!(validate::parameter(true, "a", "should pass").is_ok());
    match validate::parameter(false, "a", "should fail").unwrap_err() {
        Error::Parameter { name, reason } => {
            assert_eq!(name, "a");
            assert_eq!(reason, "should fail");
        }
        other => panic!("Expected Parameter error, got {:?}", other),
    }

    assert!(validate::length("buffer", 32, 32).is_ok());
    assert_eq!(
        validate::length("buffer", 16, 32).unwrap_err(),
        Error::Length {
            context: "buffer",
            expected: 32,
            actual: 16
        }
    );

    assert!(validate::max_length("buffer", 16, 32).is_ok());
    assert!(validate::max_length("buffer", 33, 32).is_err());

    assert!(validate::point(false, "decode", "bad prefix").is_err());
}

#[test]
fn test_context_is_replaced() {
    let res: Result<()> = Err(Error::InvalidScalar {
        context: "inner",
        reason: "zero",
    });
    match to_core_result(res, "signing").unwrap_err() {
        CoreError::InvalidScalar { context, message } => {
            assert_eq!(context, "signing");
            assert_eq!(message, "zero");
        }
        other => panic!("Expected InvalidScalar error, got {:?}", other),
    }
}
