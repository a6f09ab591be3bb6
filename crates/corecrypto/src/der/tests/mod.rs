// Copyright (C) Microsoft Corporation. All rights reserved.

mod digest_tests;

use super::*;
